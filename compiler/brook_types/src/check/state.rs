//! Script-level checking.

use brook_ir::ast::TopLevel;

use super::expr::check_expr;
use super::poly::{check_let, check_let_rec};
use crate::bindings::Bindings;
use crate::core::TypeCheckerCore;
use crate::error::TypeError;

/// A checking session: type state and global bindings that persist across
/// scripts, REPL style.
#[derive(Default)]
pub struct TypeckState {
    core: TypeCheckerCore,
    bindings: Bindings,
}

impl TypeckState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `items` in order.
    ///
    /// All-or-nothing: on success the script's definitions become visible to
    /// later scripts; on the first error every node, edge and binding the
    /// script added is discarded and the error returned.
    #[tracing::instrument(level = "debug", skip_all, fields(items = items.len()))]
    pub fn check_script(&mut self, items: &[TopLevel]) -> Result<(), TypeError> {
        debug_assert_eq!(
            self.bindings.pending_changes(),
            0,
            "bindings left uncommitted by a previous script"
        );
        let saved = self.core.save();
        let mark = self.bindings.unwind_point();

        for (index, item) in items.iter().enumerate() {
            if let Err(err) = check_toplevel(&mut self.core, &mut self.bindings, item) {
                tracing::debug!(
                    index,
                    code = %err.code(),
                    span = %err.primary_span(),
                    discarded = self.core.node_count() - saved.node_count(),
                    "script failed, rolling back"
                );
                self.core.restore(saved);
                self.bindings.unwind(mark);
                return Err(err);
            }
        }

        self.bindings.commit();
        tracing::debug!(
            nodes = self.core.node_count(),
            globals = self.bindings.len(),
            "script checked"
        );
        Ok(())
    }

    pub fn core(&self) -> &TypeCheckerCore {
        &self.core
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

fn check_toplevel(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    item: &TopLevel,
) -> Result<(), TypeError> {
    match item {
        TopLevel::Expr(expr) => {
            check_expr(engine, bindings, expr)?;
        }
        TopLevel::LetDef(def) => {
            let scheme = check_let(engine, bindings, &def.value)?;
            bindings.insert_scheme(def.name, scheme);
        }
        TopLevel::LetRecDef(defs) => check_let_rec(engine, bindings, defs)?,
    }
    Ok(())
}
