//! The constraint engine: typed nodes over a reachability arena.
//!
//! Nodes are variables, concrete values, or concrete uses. [`flow`] records
//! that a value reaches a use; the arena closes the relation, and every newly
//! connected concrete (value, use) pair is checked with
//! [`check_heads`](crate::heads::check_heads), which may imply more flows.
//!
//! [`flow`]: TypeCheckerCore::flow

use std::fmt;

use brook_ir::{Name, Span};
use rustc_hash::FxHashMap;

use crate::error::TypeError;
use crate::heads::{check_heads, LazyFlow, UTypeHead, VTypeHead};
use crate::reachability::{NodeId, Reachability, Snapshot};

/// Handle to a node in value position: something that produces values.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Value(NodeId);

/// Handle to a node in use position: something that consumes values.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Use(NodeId);

impl Value {
    pub const fn node(self) -> NodeId {
        self.0
    }
}

impl Use {
    pub const fn node(self) -> NodeId {
        self.0
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({:?})", self.0)
    }
}

impl fmt::Debug for Use {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use({:?})", self.0)
    }
}

/// Payload of an arena slot. A node keeps its kind for its whole lifetime.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    /// Unconstrained; only passes flows along.
    Var,
    Value(VTypeHead, Span),
    Use(UTypeHead, Span),
}

/// Opaque marker for [`TypeCheckerCore::restore`].
pub struct SavePoint(Snapshot);

impl SavePoint {
    /// Node count when the save point was taken.
    pub fn node_count(&self) -> usize {
        self.0.len()
    }
}

/// Owns all type nodes of a checking session.
#[derive(Default)]
pub struct TypeCheckerCore {
    r: Reachability<TypeNode>,
}

impl TypeCheckerCore {
    pub fn new() -> Self {
        TypeCheckerCore {
            r: Reachability::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.r.len()
    }

    /// Number of value/use pairs known to flow.
    pub fn edge_count(&self) -> usize {
        self.r.edge_count()
    }

    /// Kind of the node behind a handle.
    pub fn node(&self, id: NodeId) -> &TypeNode {
        self.r.payload(id)
    }

    /// True if `lhs` has been connected to `rhs`, directly or transitively.
    pub fn flows_to(&self, lhs: Value, rhs: Use) -> bool {
        self.r.contains_edge(lhs.0, rhs.0)
    }

    fn new_val(&mut self, head: VTypeHead, span: Span) -> Value {
        Value(self.r.add_node(TypeNode::Value(head, span)))
    }

    fn new_use(&mut self, head: UTypeHead, span: Span) -> Use {
        Use(self.r.add_node(TypeNode::Use(head, span)))
    }

    /// Fresh variable, returned as both ends of the same node.
    pub fn var(&mut self) -> (Value, Use) {
        let id = self.r.add_node(TypeNode::Var);
        (Value(id), Use(id))
    }

    // Values

    pub fn bool(&mut self, span: Span) -> Value {
        self.new_val(VTypeHead::Bool, span)
    }

    pub fn float(&mut self, span: Span) -> Value {
        self.new_val(VTypeHead::Float, span)
    }

    pub fn int(&mut self, span: Span) -> Value {
        self.new_val(VTypeHead::Int, span)
    }

    pub fn null(&mut self, span: Span) -> Value {
        self.new_val(VTypeHead::Null, span)
    }

    pub fn str(&mut self, span: Span) -> Value {
        self.new_val(VTypeHead::Str, span)
    }

    pub fn func(&mut self, arg: Use, ret: Value, span: Span) -> Value {
        self.new_val(VTypeHead::Func { arg, ret }, span)
    }

    /// Record value. A later duplicate in `fields` replaces an earlier one;
    /// the checker rejects duplicates before getting here.
    pub fn obj(&mut self, fields: Vec<(Name, Value)>, proto: Option<Value>, span: Span) -> Value {
        let fields = fields.into_iter().collect::<FxHashMap<_, _>>();
        self.new_val(VTypeHead::Obj { fields, proto }, span)
    }

    pub fn case(&mut self, (tag, payload): (Name, Value), span: Span) -> Value {
        self.new_val(VTypeHead::Case { tag, payload }, span)
    }

    pub fn reference(&mut self, write: Option<Use>, read: Option<Value>, span: Span) -> Value {
        self.new_val(VTypeHead::Ref { write, read }, span)
    }

    // Uses

    pub fn bool_use(&mut self, span: Span) -> Use {
        self.new_use(UTypeHead::Bool, span)
    }

    pub fn float_use(&mut self, span: Span) -> Use {
        self.new_use(UTypeHead::Float, span)
    }

    pub fn int_use(&mut self, span: Span) -> Use {
        self.new_use(UTypeHead::Int, span)
    }

    pub fn null_use(&mut self, span: Span) -> Use {
        self.new_use(UTypeHead::Null, span)
    }

    pub fn str_use(&mut self, span: Span) -> Use {
        self.new_use(UTypeHead::Str, span)
    }

    pub fn int_or_float_use(&mut self, span: Span) -> Use {
        self.new_use(UTypeHead::IntOrFloat, span)
    }

    pub fn func_use(&mut self, arg: Value, ret: Use, span: Span) -> Use {
        self.new_use(UTypeHead::Func { arg, ret }, span)
    }

    pub fn obj_use(&mut self, field: (Name, Use), span: Span) -> Use {
        self.new_use(UTypeHead::Obj { field }, span)
    }

    pub fn case_use(
        &mut self,
        cases: Vec<(Name, (Use, LazyFlow))>,
        wildcard: Option<(Use, LazyFlow)>,
        span: Span,
    ) -> Use {
        let cases = cases.into_iter().collect::<FxHashMap<_, _>>();
        self.new_use(UTypeHead::Case { cases, wildcard }, span)
    }

    pub fn reference_use(&mut self, write: Option<Value>, read: Option<Use>, span: Span) -> Use {
        self.new_use(UTypeHead::Ref { write, read }, span)
    }

    pub fn null_check_use(&mut self, nonnull: Use, span: Span) -> Use {
        self.new_use(UTypeHead::NullCase { nonnull }, span)
    }

    /// Require that `lhs` flows into `rhs`.
    ///
    /// Stops at the first incompatible pair. Edges added before the failure
    /// stay in the graph; callers that need atomicity bracket the call with
    /// [`save`](Self::save) and [`restore`](Self::restore).
    #[tracing::instrument(level = "trace", skip_all, fields(lhs = ?lhs, rhs = ?rhs))]
    pub fn flow(&mut self, lhs: Value, rhs: Use) -> Result<(), TypeError> {
        let mut pending = vec![(lhs, rhs)];
        let mut new_edges = Vec::new();
        let mut implied = Vec::new();

        while let Some((lhs, rhs)) = pending.pop() {
            new_edges.clear();
            self.r.add_edge(lhs.0, rhs.0, &mut new_edges);

            for &(lhs, rhs) in &new_edges {
                let (TypeNode::Value(lhs_head, lhs_span), TypeNode::Use(rhs_head, rhs_span)) =
                    (self.r.payload(lhs), self.r.payload(rhs))
                else {
                    tracing::trace!(?lhs, ?rhs, "deferred: endpoint not concrete");
                    continue;
                };
                tracing::trace!(?lhs, ?rhs, "checking heads");
                check_heads(
                    Value(lhs),
                    (lhs_head, *lhs_span),
                    Use(rhs),
                    (rhs_head, *rhs_span),
                    &mut implied,
                )?;
                pending.append(&mut implied);
            }
        }
        Ok(())
    }

    /// Mark the current state for a later [`restore`](Self::restore).
    pub fn save(&self) -> SavePoint {
        SavePoint(self.r.snapshot())
    }

    /// Forget every node and edge created since `point` was taken.
    ///
    /// # Panics
    /// Panics if a save point taken later than `point` was already restored,
    /// i.e. save points were not unwound in LIFO order.
    pub fn restore(&mut self, point: SavePoint) {
        tracing::trace!(
            from = self.r.len(),
            to = point.node_count(),
            "restoring type state"
        );
        self.r.restore(point.0);
    }
}

#[cfg(test)]
mod tests;
