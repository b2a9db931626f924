//! Binary operators and reference capabilities.

/// Binary operators as written in source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mult,
    Div,
    Rem,

    // Comparison
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Neq,
}

/// Operand class of a binary operator, resolved by the parser from the
/// operator spelling (`+` vs `+.` vs `^`).
///
/// The checker constrains operands by class only; the concrete [`BinaryOp`]
/// matters for the null-narrowing check (`==` / `!=`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpType {
    /// Both operands int, result int.
    IntOp,
    /// Both operands float, result float.
    FloatOp,
    /// Both operands string, result string.
    StrOp,
    /// Both operands int or float, result bool.
    IntOrFloatCmp,
    /// Any operands, result bool.
    AnyCmp,
}

/// Capabilities granted by a reference constructor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Readability {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl Readability {
    pub const fn can_read(self) -> bool {
        matches!(self, Self::ReadWrite | Self::ReadOnly)
    }

    pub const fn can_write(self) -> bool {
        matches!(self, Self::ReadWrite | Self::WriteOnly)
    }
}
