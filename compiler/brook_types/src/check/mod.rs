//! Expression checking.
//!
//! Walks the AST, creating value and use nodes and connecting them with
//! `flow`. The first error aborts the walk; [`TypeckState`] undoes whatever
//! the failed script had added.
//!
//! # Module Structure
//!
//! - `expr`: the per-form rules of [`check_expr`]
//! - `patterns`: function-argument destructuring and match-arm ordering
//! - `poly`: let-polymorphism by re-checking captured definitions
//! - `state`: script-level checking with rollback

mod expr;
mod patterns;
mod poly;
mod state;

pub use expr::check_expr;
pub use patterns::process_let_pattern;
pub use poly::{check_let, check_let_rec, PolyLet, PolyLetRec};
pub use state::TypeckState;
