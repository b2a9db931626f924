//! Let-polymorphism by re-checking.
//!
//! A let-bound function is not generalized. Instead its definition and the
//! bindings visible at the definition are captured, and every use re-checks
//! the definition from scratch, giving each use site independent nodes.
//! The definition is also checked once eagerly so errors inside an unused
//! function are still reported, at the definition.

use std::rc::Rc;

use brook_ir::ast::{Expr, ExprKind, VarDefinition};

use super::expr::check_expr;
use crate::bindings::{Bindings, Scheme};
use crate::core::{TypeCheckerCore, Value};
use crate::error::TypeError;

/// A captured let-bound function.
pub struct PolyLet {
    captured: Bindings,
    expr: Expr,
}

impl PolyLet {
    fn new(captured: Bindings, expr: Expr) -> Self {
        PolyLet { captured, expr }
    }

    /// Check a fresh copy of the definition.
    pub fn instantiate(&self, engine: &mut TypeCheckerCore) -> Result<Value, TypeError> {
        let mut bindings = self.captured.capture();
        check_expr(engine, &mut bindings, &self.expr)
    }
}

/// A captured `let rec` group.
pub struct PolyLetRec {
    captured: Bindings,
    defs: Vec<VarDefinition>,
}

impl PolyLetRec {
    fn new(captured: Bindings, defs: Vec<VarDefinition>) -> Self {
        PolyLetRec { captured, defs }
    }

    /// Check a fresh copy of the whole group, one value per member.
    ///
    /// Inside the group, members refer to each other monomorphically.
    pub fn instantiate(&self, engine: &mut TypeCheckerCore) -> Result<Vec<Value>, TypeError> {
        let mut bindings = self.captured.capture();

        let vars: Vec<_> = self
            .defs
            .iter()
            .map(|def| {
                let (value, bound) = engine.var();
                bindings.insert(def.name, value);
                (value, bound)
            })
            .collect();

        for (def, &(_, bound)) in self.defs.iter().zip(&vars) {
            let def_type = check_expr(engine, &mut bindings, &def.value)?;
            engine.flow(def_type, bound)?;
        }

        Ok(vars.into_iter().map(|(value, _)| value).collect())
    }

    /// Value of member `index` in a fresh copy of the group.
    pub fn instantiate_member(
        &self,
        engine: &mut TypeCheckerCore,
        index: usize,
    ) -> Result<Value, TypeError> {
        let mut values = self.instantiate(engine)?;
        Ok(values.swap_remove(index))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Scheme {
    /// A value for one use of the bound name.
    pub fn instantiate(&self, engine: &mut TypeCheckerCore) -> Result<Value, TypeError> {
        match self {
            Scheme::Mono(value) => Ok(*value),
            Scheme::Poly(poly) => poly.instantiate(engine),
            Scheme::PolyRec(group, index) => group.instantiate_member(engine, *index),
        }
    }
}

/// Scheme for `let name = expr`: polymorphic for function definitions,
/// monomorphic otherwise.
pub fn check_let(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    expr: &Expr,
) -> Result<Scheme, TypeError> {
    if let ExprKind::FuncDef { .. } = expr.kind {
        let poly = PolyLet::new(bindings.capture(), expr.clone());
        poly.instantiate(engine)?;
        Ok(Scheme::Poly(Rc::new(poly)))
    } else {
        check_expr(engine, bindings, expr).map(Scheme::Mono)
    }
}

/// Bind every member of a `let rec` group into `bindings`.
pub fn check_let_rec(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    defs: &[VarDefinition],
) -> Result<(), TypeError> {
    let group = Rc::new(PolyLetRec::new(bindings.capture(), defs.to_vec()));
    group.instantiate(engine)?;

    for (index, def) in defs.iter().enumerate() {
        bindings.insert_scheme(def.name, Scheme::PolyRec(Rc::clone(&group), index));
    }
    Ok(())
}
