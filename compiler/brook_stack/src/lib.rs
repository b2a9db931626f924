//! Stack growth for deeply recursive passes.
//!
//! The type checker walks expressions recursively, and every use of a
//! polymorphic `let` re-enters that walk for the binding's whole body. Deeply
//! nested or heavily reused definitions can therefore recurse much further
//! than the AST depth alone suggests.
//!
//! [`ensure_sufficient_stack`] grows the stack on demand with `stacker` on
//! native targets. On `wasm32` it calls through directly.

/// Remaining stack below which a new segment is allocated (128KB).
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
pub const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
///
/// Wrap the body of every function that recurses on user-controlled input:
///
/// ```text
/// fn check_expr(..) -> Result<Value, TypeError> {
///     ensure_sufficient_stack(|| check_expr_inner(..))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// `wasm32` manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
