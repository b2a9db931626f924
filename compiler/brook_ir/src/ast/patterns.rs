//! Binding patterns.

use crate::{Name, Span};

use super::Expr;

/// Pattern in function-argument position.
#[derive(Clone, Debug, PartialEq)]
pub enum LetPattern {
    /// Bind the whole argument.
    Var(Name),
    /// Destructure a record; fields not listed are ignored.
    Record(Vec<FieldPattern>),
}

/// `field = pattern` inside a record pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldPattern {
    pub name: Name,
    pub span: Span,
    pub pattern: LetPattern,
}

/// Pattern in match-arm position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchPattern {
    /// `` `Tag binding `` matches one case and binds its payload.
    Case { tag: Name, binding: Name },
    /// `binding` matches anything and binds the whole scrutinee.
    Wildcard { binding: Name },
}

/// `pattern -> body`; `span` covers the pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchArm {
    pub pattern: MatchPattern,
    pub span: Span,
    pub body: Expr,
}
