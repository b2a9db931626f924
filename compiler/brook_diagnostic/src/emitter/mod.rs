//! Diagnostic emitters.
//!
//! Each emitter implements [`DiagnosticEmitter`]. Only a terminal emitter is
//! provided; tooling that needs machine-readable output can implement the
//! trait over [`Diagnostic`](crate::Diagnostic) directly.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in some output format.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a closing summary line; nothing when there were no errors.
    fn emit_summary(&mut self, error_count: usize);
}
