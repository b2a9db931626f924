use std::fmt;

/// Error codes for Brook diagnostics.
///
/// Format: E#### where the first digit names the class:
/// - E2xxx: type errors
/// - E3xxx: pattern errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Type Errors (E2xxx)
    /// Undefined variable
    E2001,
    /// Repeated field name in a record literal or record pattern
    E2002,
    /// Record is missing a required field
    E2003,
    /// Case tag not handled by a match
    E2004,
    /// Reference is not readable
    E2005,
    /// Reference is not writable
    E2006,
    /// Value shape does not match expected shape
    E2007,

    // Pattern Errors (E3xxx)
    /// Unreachable match arm
    E3001,
}

impl ErrorCode {
    /// The code as written in output (e.g. "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E3001 => "E3001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
