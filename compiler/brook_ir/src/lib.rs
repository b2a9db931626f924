//! Brook IR - shared front-end data types.
//!
//! This crate holds the data the type checker consumes:
//! - [`Span`]: opaque source locations threaded into diagnostics
//! - [`Name`] and [`StringInterner`]: interned identifiers, field names and tags
//! - [`ast`]: the expression tree handed over by the parser
//! - [`AstBuilder`]: programmatic AST construction with fresh spans
//!
//! The checker never inspects span contents. Names are compared by index and
//! only resolved back to text when a diagnostic is rendered.

mod builder;
mod interner;
mod name;
mod span;

pub mod ast;

pub use builder::AstBuilder;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}
