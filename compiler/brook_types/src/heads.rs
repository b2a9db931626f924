//! Value and use heads and the rules for connecting them.
//!
//! A head is the outermost shape of a type node: what a value *is*
//! ([`VTypeHead`]) or what a context *requires* ([`UTypeHead`]). Children of
//! a head are further value or use handles, so a head only ever describes
//! one level. [`check_heads`] decides whether a value head may flow into a
//! use head and, if so, which child flows that implies.

use brook_ir::{Name, Span};
use rustc_hash::FxHashMap;

use crate::core::{Use, Value};
use crate::error::{Shape, TypeError};

/// Deferred flow attached to a match arm.
///
/// Fires only once a value carrying the arm's tag actually reaches the
/// match, so arms the scrutinee can never produce contribute nothing to the
/// merged result.
pub type LazyFlow = (Value, Use);

/// Producer-side shape.
#[derive(Clone, Debug, PartialEq)]
pub enum VTypeHead {
    Bool,
    Float,
    Int,
    Null,
    Str,
    Func {
        arg: Use,
        ret: Value,
    },
    Obj {
        fields: FxHashMap<Name, Value>,
        proto: Option<Value>,
    },
    Case {
        tag: Name,
        payload: Value,
    },
    /// `write` is present when the reference may be assigned, `read` when it
    /// may be dereferenced.
    Ref {
        write: Option<Use>,
        read: Option<Value>,
    },
}

impl VTypeHead {
    pub fn shape(&self) -> Shape {
        match self {
            VTypeHead::Bool => Shape::Bool,
            VTypeHead::Float => Shape::Float,
            VTypeHead::Int => Shape::Int,
            VTypeHead::Null => Shape::Null,
            VTypeHead::Str => Shape::Str,
            VTypeHead::Func { .. } => Shape::Func,
            VTypeHead::Obj { .. } => Shape::Record,
            VTypeHead::Case { .. } => Shape::Case,
            VTypeHead::Ref { .. } => Shape::Ref,
        }
    }
}

/// Consumer-side shape.
#[derive(Clone, Debug, PartialEq)]
pub enum UTypeHead {
    Bool,
    Float,
    Int,
    Null,
    Str,
    IntOrFloat,
    Func {
        arg: Value,
        ret: Use,
    },
    /// Demands a single field; multi-field demands are separate uses.
    Obj {
        field: (Name, Use),
    },
    Case {
        cases: FxHashMap<Name, (Use, LazyFlow)>,
        wildcard: Option<(Use, LazyFlow)>,
    },
    Ref {
        write: Option<Value>,
        read: Option<Use>,
    },
    /// Null passes through; anything else flows on into `nonnull`.
    NullCase {
        nonnull: Use,
    },
}

impl UTypeHead {
    pub fn shape(&self) -> Shape {
        match self {
            UTypeHead::Bool => Shape::Bool,
            UTypeHead::Float => Shape::Float,
            UTypeHead::Int => Shape::Int,
            UTypeHead::Null => Shape::Null,
            UTypeHead::Str => Shape::Str,
            UTypeHead::IntOrFloat => Shape::IntOrFloat,
            UTypeHead::Func { .. } => Shape::Func,
            UTypeHead::Obj { .. } => Shape::Record,
            UTypeHead::Case { .. } => Shape::Case,
            UTypeHead::Ref { .. } => Shape::Ref,
            UTypeHead::NullCase { .. } => Shape::Nullable,
        }
    }
}

/// Check that value head `lhs` may flow into use head `rhs`.
///
/// `lhs` and `rhs` are the handles of the two nodes, needed where a rule
/// forwards the whole node (prototype lookup, wildcard arms, null checks).
/// Implied child flows are appended to `out`; the caller feeds them back
/// into the graph.
pub fn check_heads(
    lhs: Value,
    (lhs_head, lhs_span): (&VTypeHead, Span),
    rhs: Use,
    (rhs_head, rhs_span): (&UTypeHead, Span),
    out: &mut Vec<(Value, Use)>,
) -> Result<(), TypeError> {
    use UTypeHead as U;
    use VTypeHead as V;

    match (lhs_head, rhs_head) {
        (V::Bool, U::Bool)
        | (V::Float, U::Float)
        | (V::Int, U::Int)
        | (V::Null, U::Null)
        | (V::Str, U::Str)
        | (V::Int | V::Float, U::IntOrFloat) => Ok(()),

        // Arguments are contravariant, results covariant.
        (V::Func { arg: arg1, ret: ret1 }, U::Func { arg: arg2, ret: ret2 }) => {
            out.push((*ret1, *ret2));
            out.push((*arg2, *arg1));
            Ok(())
        }

        (V::Obj { fields, proto }, U::Obj { field: (name, field_use) }) => {
            if let Some(field_value) = fields.get(name) {
                out.push((*field_value, *field_use));
                Ok(())
            } else if let Some(proto) = proto {
                // Ask the prototype the same question.
                out.push((*proto, rhs));
                Ok(())
            } else {
                Err(TypeError::MissingField {
                    field: *name,
                    value_span: lhs_span,
                    use_span: rhs_span,
                })
            }
        }

        (V::Case { tag, payload }, U::Case { cases, wildcard }) => {
            if let Some((payload_use, lazy)) = cases.get(tag) {
                out.push((*payload, *payload_use));
                out.push(*lazy);
                Ok(())
            } else if let Some((wildcard_use, lazy)) = wildcard {
                // Wildcard arms bind the whole case value, not its payload.
                out.push((lhs, *wildcard_use));
                out.push(*lazy);
                Ok(())
            } else {
                Err(TypeError::UnhandledCase {
                    tag: *tag,
                    value_span: lhs_span,
                    use_span: rhs_span,
                })
            }
        }

        (
            V::Ref {
                write: w1,
                read: r1,
            },
            U::Ref {
                write: w2,
                read: r2,
            },
        ) => {
            if let Some(r2) = r2 {
                let Some(r1) = r1 else {
                    return Err(TypeError::NotReadable {
                        value_span: lhs_span,
                        use_span: rhs_span,
                    });
                };
                out.push((*r1, *r2));
            }
            if let Some(w2) = w2 {
                let Some(w1) = w1 else {
                    return Err(TypeError::NotWritable {
                        value_span: lhs_span,
                        use_span: rhs_span,
                    });
                };
                out.push((*w2, *w1));
            }
            Ok(())
        }

        (V::Null, U::NullCase { .. }) => Ok(()),
        (_, U::NullCase { nonnull }) => {
            out.push((lhs, *nonnull));
            Ok(())
        }

        _ => Err(TypeError::TypeMismatch {
            found: lhs_head.shape(),
            expected: rhs_head.shape(),
            value_span: lhs_span,
            use_span: rhs_span,
        }),
    }
}
