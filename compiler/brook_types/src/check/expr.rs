//! Checking rules for each expression form.

use brook_ir::ast::{BinaryOp, Expr, ExprKind, Literal, MatchPattern, OpType};
use brook_ir::{Name, Span};
use brook_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use super::patterns::{process_let_pattern, ArmTracker};
use super::poly::{check_let, check_let_rec};
use crate::bindings::{Bindings, Scheme};
use crate::core::{TypeCheckerCore, Value};
use crate::error::TypeError;

/// Check `expr` and return the node holding its value.
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(kind = expr.kind.describe(), span = ?expr.span)
)]
pub fn check_expr(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    expr: &Expr,
) -> Result<Value, TypeError> {
    ensure_sufficient_stack(|| check_expr_inner(engine, bindings, expr))
}

fn check_expr_inner(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    expr: &Expr,
) -> Result<Value, TypeError> {
    let span = expr.span;
    match &expr.kind {
        ExprKind::Literal { kind, .. } => Ok(match kind {
            Literal::Bool => engine.bool(span),
            Literal::Float => engine.float(span),
            Literal::Int => engine.int(span),
            Literal::Null => engine.null(span),
            Literal::Str => engine.str(span),
        }),

        ExprKind::Variable(name) => check_variable(engine, bindings, *name, span),

        ExprKind::Binary {
            op_type,
            left,
            right,
            ..
        } => check_binary(engine, bindings, *op_type, left, right, span),

        ExprKind::Call { func, arg } => {
            let func_type = check_expr(engine, bindings, func)?;
            let arg_type = check_expr(engine, bindings, arg)?;

            let (ret_type, ret_bound) = engine.var();
            let bound = engine.func_use(arg_type, ret_bound, span);
            engine.flow(func_type, bound)?;
            Ok(ret_type)
        }

        ExprKind::FuncDef { param, body } => {
            let (arg_bound, body_type) = bindings.in_child_scope(|bindings| {
                let arg_bound = process_let_pattern(engine, bindings, param)?;
                let body_type = check_expr(engine, bindings, body)?;
                Ok::<_, TypeError>((arg_bound, body_type))
            })?;
            Ok(engine.func(arg_bound, body_type, span))
        }

        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => check_if(engine, bindings, cond, then_branch, else_branch),

        ExprKind::Let { def, body } => {
            let scheme = check_let(engine, bindings, &def.value)?;
            bindings.in_child_scope(|bindings| {
                bindings.insert_scheme(def.name, scheme);
                check_expr(engine, bindings, body)
            })
        }

        ExprKind::LetRec { defs, body } => bindings.in_child_scope(|bindings| {
            check_let_rec(engine, bindings, defs)?;
            check_expr(engine, bindings, body)
        }),

        ExprKind::Record { proto, fields } => {
            let proto_type = match proto {
                Some(proto) => Some(check_expr(engine, bindings, proto)?),
                None => None,
            };

            let mut seen: FxHashMap<Name, Span> = FxHashMap::default();
            let mut field_types = Vec::with_capacity(fields.len());
            for field in fields {
                if let Some(first) = seen.insert(field.name, field.span) {
                    return Err(TypeError::RepeatedField {
                        name: field.name,
                        first,
                        second: field.span,
                    });
                }
                field_types.push((field.name, check_expr(engine, bindings, &field.value)?));
            }
            Ok(engine.obj(field_types, proto_type, span))
        }

        ExprKind::FieldAccess { receiver, field } => {
            let receiver_type = check_expr(engine, bindings, receiver)?;

            let (field_type, field_bound) = engine.var();
            let bound = engine.obj_use((*field, field_bound), span);
            engine.flow(receiver_type, bound)?;
            Ok(field_type)
        }

        ExprKind::Case {
            tag,
            tag_span,
            payload,
        } => {
            let payload_type = check_expr(engine, bindings, payload)?;
            Ok(engine.case((*tag, payload_type), *tag_span))
        }

        ExprKind::Match { scrutinee, arms } => {
            let scrutinee_type = check_expr(engine, bindings, scrutinee)?;
            let (result_type, result_bound) = engine.var();

            let mut tracker = ArmTracker::default();
            let mut cases = Vec::with_capacity(arms.len());
            let mut wildcard = None;

            for arm in arms {
                tracker.visit(arm)?;

                let (wrapped_type, wrapped_bound) = engine.var();
                let binding = match arm.pattern {
                    MatchPattern::Case { binding, .. } | MatchPattern::Wildcard { binding } => {
                        binding
                    }
                };
                let arm_type = bindings.in_child_scope(|bindings| {
                    bindings.insert(binding, wrapped_type);
                    check_expr(engine, bindings, &arm.body)
                })?;

                // The arm's result only joins the match result once a value
                // selecting this arm shows up.
                let lazy = (arm_type, result_bound);
                match arm.pattern {
                    MatchPattern::Case { tag, .. } => cases.push((tag, (wrapped_bound, lazy))),
                    MatchPattern::Wildcard { .. } => wildcard = Some((wrapped_bound, lazy)),
                }
            }

            let bound = engine.case_use(cases, wildcard, span);
            engine.flow(scrutinee_type, bound)?;
            Ok(result_type)
        }

        ExprKind::NewRef { init, readability } => {
            let init_type = check_expr(engine, bindings, init)?;
            let (read, write) = engine.var();
            engine.flow(init_type, write)?;
            Ok(engine.reference(
                readability.can_write().then_some(write),
                readability.can_read().then_some(read),
                span,
            ))
        }

        ExprKind::RefGet { reference } => {
            let ref_type = check_expr(engine, bindings, reference)?;

            let (cell_type, cell_bound) = engine.var();
            let bound = engine.reference_use(None, Some(cell_bound), span);
            engine.flow(ref_type, bound)?;
            Ok(cell_type)
        }

        ExprKind::RefSet { reference, value } => {
            let ref_type = check_expr(engine, bindings, reference)?;
            let value_type = check_expr(engine, bindings, value)?;

            let bound = engine.reference_use(Some(value_type), None, span);
            engine.flow(ref_type, bound)?;
            Ok(value_type)
        }

        ExprKind::Seq { first, second } => {
            check_expr(engine, bindings, first)?;
            check_expr(engine, bindings, second)
        }
    }
}

fn check_variable(
    engine: &mut TypeCheckerCore,
    bindings: &Bindings,
    name: Name,
    span: Span,
) -> Result<Value, TypeError> {
    // Poly schemes re-check against their captured bindings, not these.
    match bindings.get(name).cloned() {
        Some(scheme) => scheme.instantiate(engine),
        None => Err(TypeError::UndefinedVariable { name, span }),
    }
}

fn check_binary(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    op_type: OpType,
    left: &Expr,
    right: &Expr,
    span: Span,
) -> Result<Value, TypeError> {
    let left_type = check_expr(engine, bindings, left)?;
    let right_type = check_expr(engine, bindings, right)?;

    let (left_bound, right_bound) = match op_type {
        OpType::IntOp => (engine.int_use(left.span), engine.int_use(right.span)),
        OpType::FloatOp => (engine.float_use(left.span), engine.float_use(right.span)),
        OpType::StrOp => (engine.str_use(left.span), engine.str_use(right.span)),
        OpType::IntOrFloatCmp => (
            engine.int_or_float_use(left.span),
            engine.int_or_float_use(right.span),
        ),
        OpType::AnyCmp => return Ok(engine.bool(span)),
    };
    engine.flow(left_type, left_bound)?;
    engine.flow(right_type, right_bound)?;

    Ok(match op_type {
        OpType::IntOp => engine.int(span),
        OpType::FloatOp => engine.float(span),
        OpType::StrOp => engine.str(span),
        OpType::IntOrFloatCmp | OpType::AnyCmp => engine.bool(span),
    })
}

/// `name == null` or `name != null` (either operand order), with the operator.
fn null_test(cond: &Expr) -> Option<(Name, BinaryOp)> {
    let ExprKind::Binary {
        op: op @ (BinaryOp::Eq | BinaryOp::Neq),
        op_type: OpType::AnyCmp,
        left,
        right,
    } = &cond.kind
    else {
        return None;
    };
    match (&left.kind, &right.kind) {
        (ExprKind::Variable(name), other) | (other, ExprKind::Variable(name))
            if other.is_null_literal() =>
        {
            Some((*name, *op))
        }
        _ => None,
    }
}

fn check_if(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    cond: &Expr,
    then_branch: &Expr,
    else_branch: &Expr,
) -> Result<Value, TypeError> {
    let narrowing = null_test(cond).and_then(|(name, op)| match bindings.get(name) {
        Some(Scheme::Mono(value)) => Some((name, *value, op)),
        _ => None,
    });

    let (then_type, else_type) = if let Some((name, value, op)) = narrowing {
        // Only the branch where the variable is known non-null sees the
        // narrowed binding.
        let (nonnull_type, nonnull_bound) = engine.var();
        let bound = engine.null_check_use(nonnull_bound, cond.span);
        engine.flow(value, bound)?;

        if op == BinaryOp::Neq {
            let then_type = check_narrowed(engine, bindings, name, nonnull_type, then_branch)?;
            (then_type, check_expr(engine, bindings, else_branch)?)
        } else {
            let then_type = check_expr(engine, bindings, then_branch)?;
            let else_type = check_narrowed(engine, bindings, name, nonnull_type, else_branch)?;
            (then_type, else_type)
        }
    } else {
        let cond_type = check_expr(engine, bindings, cond)?;
        let bound = engine.bool_use(cond.span);
        engine.flow(cond_type, bound)?;

        let then_type = check_expr(engine, bindings, then_branch)?;
        (then_type, check_expr(engine, bindings, else_branch)?)
    };

    let (merged, merged_bound) = engine.var();
    engine.flow(then_type, merged_bound)?;
    engine.flow(else_type, merged_bound)?;
    Ok(merged)
}

fn check_narrowed(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    name: Name,
    nonnull: Value,
    branch: &Expr,
) -> Result<Value, TypeError> {
    bindings.in_child_scope(|bindings| {
        bindings.insert(name, nonnull);
        check_expr(engine, bindings, branch)
    })
}
