//! Programmatic AST construction.
//!
//! Used where no parser is in the loop: checker tests, tooling, and
//! embedders generating code. Every node gets a fresh, distinct span so
//! diagnostics can be traced back to the call that built the node.

use std::cell::Cell;

use crate::ast::{
    BinaryOp, Expr, ExprKind, FieldInit, FieldPattern, LetPattern, Literal, MatchArm,
    MatchPattern, OpType, Readability, VarDefinition,
};
use crate::{Name, Span, StringInterner};

/// Builds AST nodes, interning names and allocating spans as it goes.
pub struct AstBuilder<'a> {
    interner: &'a StringInterner,
    next_offset: Cell<u32>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        AstBuilder {
            interner,
            next_offset: Cell::new(0),
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// A span no other node from this builder shares.
    pub fn fresh_span(&self) -> Span {
        let start = self.next_offset.get();
        self.next_offset.set(start + 1);
        Span::new(start, start + 1)
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    fn expr(&self, kind: ExprKind) -> Expr {
        Expr::new(kind, self.fresh_span())
    }

    // Literals

    pub fn literal(&self, kind: Literal, text: &str) -> Expr {
        let text = self.name(text);
        self.expr(ExprKind::Literal { kind, text })
    }

    pub fn int(&self, value: i64) -> Expr {
        self.literal(Literal::Int, &value.to_string())
    }

    pub fn float(&self, value: f64) -> Expr {
        self.literal(Literal::Float, &format!("{value:?}"))
    }

    pub fn string(&self, value: &str) -> Expr {
        self.literal(Literal::Str, &format!("{value:?}"))
    }

    pub fn boolean(&self, value: bool) -> Expr {
        self.literal(Literal::Bool, if value { "true" } else { "false" })
    }

    pub fn null(&self) -> Expr {
        self.literal(Literal::Null, "null")
    }

    // Core forms

    pub fn var(&self, name: &str) -> Expr {
        let name = self.name(name);
        self.expr(ExprKind::Variable(name))
    }

    pub fn binary(&self, op_type: OpType, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        self.expr(ExprKind::Binary {
            op,
            op_type,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn call(&self, func: Expr, arg: Expr) -> Expr {
        self.expr(ExprKind::Call {
            func: Box::new(func),
            arg: Box::new(arg),
        })
    }

    /// `fun param -> body` binding the whole argument.
    pub fn func(&self, param: &str, body: Expr) -> Expr {
        let param = self.pat_var(param);
        self.func_pat(param, body)
    }

    pub fn func_pat(&self, param: LetPattern, body: Expr) -> Expr {
        self.expr(ExprKind::FuncDef {
            param,
            body: Box::new(body),
        })
    }

    pub fn if_then_else(&self, cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        self.expr(ExprKind::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    pub fn def(&self, name: &str, value: Expr) -> VarDefinition {
        VarDefinition {
            name: self.name(name),
            span: self.fresh_span(),
            value,
        }
    }

    pub fn let_in(&self, name: &str, value: Expr, body: Expr) -> Expr {
        let def = self.def(name, value);
        self.expr(ExprKind::Let {
            def: Box::new(def),
            body: Box::new(body),
        })
    }

    pub fn let_rec_in(&self, defs: Vec<VarDefinition>, body: Expr) -> Expr {
        self.expr(ExprKind::LetRec {
            defs,
            body: Box::new(body),
        })
    }

    pub fn seq(&self, first: Expr, second: Expr) -> Expr {
        self.expr(ExprKind::Seq {
            first: Box::new(first),
            second: Box::new(second),
        })
    }

    // Records

    pub fn record(&self, fields: Vec<(&str, Expr)>) -> Expr {
        self.record_inner(None, fields)
    }

    /// `{proto with fields}`
    pub fn record_with(&self, proto: Expr, fields: Vec<(&str, Expr)>) -> Expr {
        self.record_inner(Some(Box::new(proto)), fields)
    }

    fn record_inner(&self, proto: Option<Box<Expr>>, fields: Vec<(&str, Expr)>) -> Expr {
        let fields = fields
            .into_iter()
            .map(|(name, value)| FieldInit {
                name: self.name(name),
                span: self.fresh_span(),
                value,
            })
            .collect();
        self.expr(ExprKind::Record { proto, fields })
    }

    pub fn field(&self, receiver: Expr, field: &str) -> Expr {
        let field = self.name(field);
        self.expr(ExprKind::FieldAccess {
            receiver: Box::new(receiver),
            field,
        })
    }

    // Cases

    pub fn case(&self, tag: &str, payload: Expr) -> Expr {
        let tag = self.name(tag);
        let tag_span = self.fresh_span();
        self.expr(ExprKind::Case {
            tag,
            tag_span,
            payload: Box::new(payload),
        })
    }

    pub fn match_on(&self, scrutinee: Expr, arms: Vec<MatchArm>) -> Expr {
        self.expr(ExprKind::Match {
            scrutinee: Box::new(scrutinee),
            arms,
        })
    }

    /// `` `tag binding -> body ``
    pub fn arm_case(&self, tag: &str, binding: &str, body: Expr) -> MatchArm {
        MatchArm {
            pattern: MatchPattern::Case {
                tag: self.name(tag),
                binding: self.name(binding),
            },
            span: self.fresh_span(),
            body,
        }
    }

    /// `binding -> body`
    pub fn arm_wildcard(&self, binding: &str, body: Expr) -> MatchArm {
        MatchArm {
            pattern: MatchPattern::Wildcard {
                binding: self.name(binding),
            },
            span: self.fresh_span(),
            body,
        }
    }

    // References

    pub fn new_ref(&self, init: Expr, readability: Readability) -> Expr {
        self.expr(ExprKind::NewRef {
            init: Box::new(init),
            readability,
        })
    }

    pub fn ref_get(&self, reference: Expr) -> Expr {
        self.expr(ExprKind::RefGet {
            reference: Box::new(reference),
        })
    }

    pub fn ref_set(&self, reference: Expr, value: Expr) -> Expr {
        self.expr(ExprKind::RefSet {
            reference: Box::new(reference),
            value: Box::new(value),
        })
    }

    // Patterns

    pub fn pat_var(&self, name: &str) -> LetPattern {
        LetPattern::Var(self.name(name))
    }

    pub fn pat_record(&self, fields: Vec<(&str, LetPattern)>) -> LetPattern {
        LetPattern::Record(
            fields
                .into_iter()
                .map(|(name, pattern)| FieldPattern {
                    name: self.name(name),
                    span: self.fresh_span(),
                    pattern,
                })
                .collect(),
        )
    }
}
