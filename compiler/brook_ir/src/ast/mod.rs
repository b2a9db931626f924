//! Brook AST.
//!
//! Every expression node carries the span the checker cites in diagnostics.
//! Subtrees are boxed and `Clone`: let-polymorphism re-checks a captured copy
//! of a function definition at each use site.
//!
//! # Module Organization
//!
//! - `expr`: expressions, literals, let definitions
//! - `patterns`: function-argument and match-arm patterns
//! - `operators`: binary operators, operand classes, reference capabilities

mod expr;
mod operators;
mod patterns;

pub use expr::{Expr, ExprKind, FieldInit, Literal, VarDefinition};
pub use operators::{BinaryOp, OpType, Readability};
pub use patterns::{FieldPattern, LetPattern, MatchArm, MatchPattern};

/// One item of a script, checked in order.
#[derive(Clone, Debug, PartialEq)]
pub enum TopLevel {
    /// Bare expression, checked for errors and otherwise discarded.
    Expr(Expr),
    /// `let name = value`, visible to later items and later scripts.
    LetDef(VarDefinition),
    /// `let rec a = ... and b = ...`, a mutually recursive group.
    LetRecDef(Vec<VarDefinition>),
}
