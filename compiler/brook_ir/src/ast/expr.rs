//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, OpType, Readability};
use super::patterns::{LetPattern, MatchArm};
use crate::{Name, Span};

/// Expression node: what it is and where it came from.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Kinds of primitive literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Bool,
    Float,
    Int,
    Null,
    Str,
}

/// `name = value`; `span` covers the name.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDefinition {
    pub name: Name,
    pub span: Span,
    pub value: Expr,
}

/// `name = value` inside a record literal; `span` covers the name.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInit {
    pub name: Name,
    pub span: Span,
    pub value: Expr,
}

/// Expression variants.
///
/// Operand spans used in diagnostics are the child expressions' own spans.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// `left op right`
    Binary {
        op: BinaryOp,
        op_type: OpType,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `func arg`
    Call { func: Box<Expr>, arg: Box<Expr> },

    /// `` `Tag payload ``
    Case {
        tag: Name,
        tag_span: Span,
        payload: Box<Expr>,
    },

    /// `receiver.field`
    FieldAccess { receiver: Box<Expr>, field: Name },

    /// `fun param -> body`
    FuncDef { param: LetPattern, body: Box<Expr> },

    /// `if cond then a else b`
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// `let name = value in body`
    Let {
        def: Box<VarDefinition>,
        body: Box<Expr>,
    },

    /// `let rec a = ... and b = ... in body`
    LetRec {
        defs: Vec<VarDefinition>,
        body: Box<Expr>,
    },

    /// Primitive literal with its source text.
    Literal { kind: Literal, text: Name },

    /// `match scrutinee with arms`
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },

    /// `ref init`, optionally restricted to one capability.
    NewRef {
        init: Box<Expr>,
        readability: Readability,
    },

    /// `{proto with fields}`
    Record {
        proto: Option<Box<Expr>>,
        fields: Vec<FieldInit>,
    },

    /// `!reference`
    RefGet { reference: Box<Expr> },

    /// `reference := value`
    RefSet {
        reference: Box<Expr>,
        value: Box<Expr>,
    },

    /// `first; second`
    Seq { first: Box<Expr>, second: Box<Expr> },

    /// Variable reference.
    Variable(Name),
}

impl ExprKind {
    /// Short variant name for tracing fields.
    pub const fn describe(&self) -> &'static str {
        match self {
            ExprKind::Binary { .. } => "binary",
            ExprKind::Call { .. } => "call",
            ExprKind::Case { .. } => "case",
            ExprKind::FieldAccess { .. } => "field_access",
            ExprKind::FuncDef { .. } => "func_def",
            ExprKind::If { .. } => "if",
            ExprKind::Let { .. } => "let",
            ExprKind::LetRec { .. } => "let_rec",
            ExprKind::Literal { .. } => "literal",
            ExprKind::Match { .. } => "match",
            ExprKind::NewRef { .. } => "new_ref",
            ExprKind::Record { .. } => "record",
            ExprKind::RefGet { .. } => "ref_get",
            ExprKind::RefSet { .. } => "ref_set",
            ExprKind::Seq { .. } => "seq",
            ExprKind::Variable(_) => "variable",
        }
    }

    /// True for the `null` literal.
    pub const fn is_null_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Literal {
                kind: Literal::Null,
                ..
            }
        )
    }
}
