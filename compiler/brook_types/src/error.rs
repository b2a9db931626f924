//! Type errors.
//!
//! Errors hold spans and interned names only. Rendering to text needs the
//! [`StringInterner`] that produced the names, see [`TypeError::labels`] and
//! [`TypeError::to_diagnostic`].

use std::fmt;

use brook_diagnostic::{Diagnostic, ErrorCode};
use brook_ir::{Name, Span, StringInterner};

/// Outermost shape of a value or use head, for mismatch messages.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Shape {
    Bool,
    Float,
    Int,
    Str,
    Null,
    IntOrFloat,
    Func,
    Record,
    Case,
    Ref,
    /// A null check: accepts null or anything the guarded branch accepts.
    Nullable,
}

impl Shape {
    pub const fn describe(self) -> &'static str {
        match self {
            Shape::Bool => "boolean",
            Shape::Float => "float",
            Shape::Int => "int",
            Shape::Str => "string",
            Shape::Null => "null",
            Shape::IntOrFloat => "int or float",
            Shape::Func => "function",
            Shape::Record => "record",
            Shape::Case => "case",
            Shape::Ref => "ref",
            Shape::Nullable => "nullable value",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Why a match arm can never be selected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnreachableReason {
    /// An earlier wildcard arm matches everything.
    AfterWildcard,
    /// An earlier arm matches the same tag.
    DuplicateTag(Name),
}

/// Error from checking a script.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeError {
    UndefinedVariable {
        name: Name,
        span: Span,
    },

    /// The same field is given twice in a record literal.
    RepeatedField {
        name: Name,
        first: Span,
        second: Span,
    },

    /// The same field is destructured twice in a record pattern.
    RepeatedFieldPattern {
        name: Name,
        first: Span,
        second: Span,
    },

    /// A record without the field (or a prototype to ask) flows into a
    /// field access.
    MissingField {
        field: Name,
        value_span: Span,
        use_span: Span,
    },

    /// A case value reaches a match with no arm for its tag and no wildcard.
    UnhandledCase {
        tag: Name,
        value_span: Span,
        use_span: Span,
    },

    /// A write-only reference is read.
    NotReadable {
        value_span: Span,
        use_span: Span,
    },

    /// A read-only reference is written.
    NotWritable {
        value_span: Span,
        use_span: Span,
    },

    /// A value of one shape reaches a use expecting another.
    TypeMismatch {
        found: Shape,
        expected: Shape,
        value_span: Span,
        use_span: Span,
    },

    UnreachablePattern {
        reason: UnreachableReason,
        arm: Span,
        /// The wildcard or earlier arm responsible.
        earlier: Span,
    },
}

impl TypeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TypeError::UndefinedVariable { .. } => ErrorCode::E2001,
            TypeError::RepeatedField { .. } | TypeError::RepeatedFieldPattern { .. } => {
                ErrorCode::E2002
            }
            TypeError::MissingField { .. } => ErrorCode::E2003,
            TypeError::UnhandledCase { .. } => ErrorCode::E2004,
            TypeError::NotReadable { .. } => ErrorCode::E2005,
            TypeError::NotWritable { .. } => ErrorCode::E2006,
            TypeError::TypeMismatch { .. } => ErrorCode::E2007,
            TypeError::UnreachablePattern { .. } => ErrorCode::E3001,
        }
    }

    /// Location the error is reported at; the first label's span.
    pub fn primary_span(&self) -> Span {
        match self {
            TypeError::UndefinedVariable { span, .. } => *span,
            TypeError::RepeatedField { second, .. }
            | TypeError::RepeatedFieldPattern { second, .. } => *second,
            TypeError::MissingField { use_span, .. }
            | TypeError::TypeMismatch { use_span, .. } => *use_span,
            TypeError::UnhandledCase { value_span, .. }
            | TypeError::NotReadable { value_span, .. }
            | TypeError::NotWritable { value_span, .. } => *value_span,
            TypeError::UnreachablePattern { arm, .. } => *arm,
        }
    }

    /// Ordered `(message, span)` pairs: one for undefined variables, two
    /// for everything else. The first pair is the headline.
    pub fn labels(&self, interner: &StringInterner) -> Vec<(String, Span)> {
        match self {
            TypeError::UndefinedVariable { name, span } => vec![(
                format!("undefined variable `{}`", interner.lookup(*name)),
                *span,
            )],
            TypeError::RepeatedField {
                name,
                first,
                second,
            } => vec![
                (
                    format!("repeated field name `{}`", interner.lookup(*name)),
                    *second,
                ),
                ("field was already defined here".to_string(), *first),
            ],
            TypeError::RepeatedFieldPattern {
                name,
                first,
                second,
            } => vec![
                (
                    format!("repeated field pattern name `{}`", interner.lookup(*name)),
                    *second,
                ),
                ("field was already bound here".to_string(), *first),
            ],
            TypeError::MissingField {
                field,
                value_span,
                use_span,
            } => vec![
                (
                    format!(
                        "missing field `{}`; the field is accessed here",
                        interner.lookup(*field)
                    ),
                    *use_span,
                ),
                (
                    "but the record is defined without that field here".to_string(),
                    *value_span,
                ),
            ],
            TypeError::UnhandledCase {
                tag,
                value_span,
                use_span,
            } => vec![
                (
                    format!(
                        "unhandled case `{}`; the case originates here",
                        interner.lookup(*tag)
                    ),
                    *value_span,
                ),
                ("but it is not handled here".to_string(), *use_span),
            ],
            TypeError::NotReadable {
                value_span,
                use_span,
            } => vec![
                (
                    "reference is not readable; it is made write-only here".to_string(),
                    *value_span,
                ),
                ("but is read here".to_string(), *use_span),
            ],
            TypeError::NotWritable {
                value_span,
                use_span,
            } => vec![
                (
                    "reference is not writable; it is made read-only here".to_string(),
                    *value_span,
                ),
                ("but is written here".to_string(), *use_span),
            ],
            TypeError::TypeMismatch {
                found,
                expected,
                value_span,
                use_span,
            } => vec![
                (
                    format!("value of type {expected} is required here"),
                    *use_span,
                ),
                (
                    format!("but that value may be of type {found}, originating here"),
                    *value_span,
                ),
            ],
            TypeError::UnreachablePattern {
                reason,
                arm,
                earlier,
            } => {
                let note = match reason {
                    UnreachableReason::AfterWildcard => {
                        "unreachable due to previous wildcard pattern here".to_string()
                    }
                    UnreachableReason::DuplicateTag(tag) => format!(
                        "unreachable due to previous `{}` pattern here",
                        interner.lookup(*tag)
                    ),
                };
                vec![("unreachable match pattern".to_string(), *arm), (note, *earlier)]
            }
        }
    }

    /// Convert to a diagnostic: the first label primary, the rest secondary.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let mut labels = self.labels(interner).into_iter();
        let mut diag = Diagnostic::error(self.code()).with_message(self.to_string());
        if let Some((message, span)) = labels.next() {
            diag = diag.with_label(span, message);
        }
        for (message, span) in labels {
            diag = diag.with_secondary_label(span, message);
        }
        diag
    }
}

/// Summary without names; use [`TypeError::labels`] for full text.
impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UndefinedVariable { .. } => write!(f, "undefined variable"),
            TypeError::RepeatedField { .. } => write!(f, "repeated field name"),
            TypeError::RepeatedFieldPattern { .. } => write!(f, "repeated field pattern name"),
            TypeError::MissingField { .. } => write!(f, "missing field"),
            TypeError::UnhandledCase { .. } => write!(f, "unhandled case"),
            TypeError::NotReadable { .. } => write!(f, "reference is not readable"),
            TypeError::NotWritable { .. } => write!(f, "reference is not writable"),
            TypeError::TypeMismatch {
                found, expected, ..
            } => write!(f, "type mismatch: expected {expected}, found {found}"),
            TypeError::UnreachablePattern { .. } => write!(f, "unreachable match pattern"),
        }
    }
}

impl std::error::Error for TypeError {}
