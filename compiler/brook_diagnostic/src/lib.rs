//! Diagnostic system for Brook error reporting.
//!
//! A [`Diagnostic`] carries:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - a primary label saying where
//! - secondary labels and notes giving context
//!
//! Emitters in [`emitter`] render diagnostics for humans. When handed the
//! source text, the terminal emitter resolves spans to `line:column` via
//! [`span_utils::LineOffsetTable`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
