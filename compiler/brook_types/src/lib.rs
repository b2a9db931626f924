//! Structural flow-typing checker for Brook.
//!
//! Types are never written down. Every expression produces a *value* node,
//! every context that consumes a value produces a *use* node, and the checker
//! records that the value flows into the use. A reachability graph keeps the
//! flow relation transitively closed; whenever a concrete value becomes
//! connected to a concrete use, their heads are compared and decomposed into
//! further flows.
//!
//! # Layers
//!
//! - [`reachability`]: incremental transitive closure over dense node ids
//! - [`heads`]: value and use shapes and their pairwise compatibility rules
//! - [`TypeCheckerCore`]: node construction, `flow`, save and restore
//! - [`Bindings`]: scoped name table with exact undo
//! - [`check_expr`] / [`TypeckState`]: the AST walk and script checking
//!
//! # Example
//!
//! ```
//! use brook_ir::{ast::TopLevel, AstBuilder, StringInterner};
//! use brook_types::TypeckState;
//!
//! let interner = StringInterner::new();
//! let b = AstBuilder::new(&interner);
//! let mut state = TypeckState::new();
//!
//! let id = b.def("id", b.func("x", b.var("x")));
//! assert!(state.check_script(&[TopLevel::LetDef(id)]).is_ok());
//!
//! let bad = b.call(b.var("missing"), b.int(1));
//! let err = state.check_script(&[TopLevel::Expr(bad)]).unwrap_err();
//! assert_eq!(err.labels(&interner).len(), 1);
//! ```

mod bindings;
mod check;
mod core;
mod error;

pub mod heads;
pub mod reachability;

pub use bindings::{Bindings, Scheme, UnwindPoint};
pub use check::{
    check_expr, check_let, check_let_rec, process_let_pattern, PolyLet, PolyLetRec, TypeckState,
};
pub use core::{SavePoint, TypeCheckerCore, TypeNode, Use, Value};
pub use error::{Shape, TypeError, UnreachableReason};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only ever installs once per
/// process. Embedders with their own subscriber should not call this.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed elsewhere wins.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Use, Value};
    brook_ir::static_assert_size!(Value, 4);
    brook_ir::static_assert_size!(Use, 4);
}
