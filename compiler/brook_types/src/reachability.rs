//! Incremental transitive closure over a growing node arena.
//!
//! Nodes are dense ids handed out in increasing order. Each arena slot holds
//! the caller's payload next to the node's predecessor and successor sets, so
//! node data and adjacency cannot drift apart. Inserting an edge eagerly
//! closes the relation and reports every pair that became reachable, which
//! is what lets the checker react to new value/use connections without ever
//! rescanning the graph.

use std::fmt;

use rustc_hash::FxHashSet;

/// Dense index of a node in a [`Reachability`] arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Set with insertion-ordered iteration and O(1) membership.
///
/// Iteration order makes closure propagation, and therefore the order in
/// which the checker discovers errors, deterministic.
#[derive(Clone, Default, Debug)]
struct OrderedSet {
    members: FxHashSet<NodeId>,
    order: Vec<NodeId>,
}

impl OrderedSet {
    /// Returns false if `id` was already present.
    fn insert(&mut self, id: NodeId) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    #[inline]
    fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

struct Slot<T> {
    payload: T,
    /// Nodes that reach this one.
    upsets: OrderedSet,
    /// Nodes this one reaches.
    downsets: OrderedSet,
}

/// Node arena with a transitively closed edge relation.
pub struct Reachability<T> {
    slots: Vec<Slot<T>>,
}

/// Captured arena length and adjacency, see [`Reachability::snapshot`].
pub struct Snapshot {
    len: usize,
    edges: Vec<(OrderedSet, OrderedSet)>,
}

impl Snapshot {
    /// Number of nodes at capture time.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Reachability<T> {
    pub fn new() -> Self {
        Reachability { slots: Vec::new() }
    }

    /// Append a node with no edges.
    ///
    /// # Panics
    /// Panics if the arena outgrows `u32` ids.
    pub fn add_node(&mut self, payload: T) -> NodeId {
        let id = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("reachability arena exceeded u32::MAX nodes"));
        self.slots.push(Slot {
            payload,
            upsets: OrderedSet::default(),
            downsets: OrderedSet::default(),
        });
        NodeId(id)
    }

    /// Insert `lhs -> rhs` and close the relation.
    ///
    /// Every pair that was not reachable before and is now gets pushed to
    /// `out`, including `(lhs, rhs)` itself. Inserting a present edge
    /// reports nothing. Work is proportional to the number of new pairs
    /// times the fan-in/fan-out examined for each.
    pub fn add_edge(&mut self, lhs: NodeId, rhs: NodeId, out: &mut Vec<(NodeId, NodeId)>) {
        let mut work = vec![(lhs, rhs)];
        while let Some((lhs, rhs)) = work.pop() {
            if !self.slots[lhs.index()].downsets.insert(rhs) {
                continue;
            }
            self.slots[rhs.index()].upsets.insert(lhs);
            out.push((lhs, rhs));

            // Everything reaching lhs now reaches rhs.
            for pred in self.slots[lhs.index()].upsets.iter() {
                if !self.contains_edge(pred, rhs) {
                    work.push((pred, rhs));
                }
            }
            // lhs now reaches everything rhs reaches.
            for succ in self.slots[rhs.index()].downsets.iter() {
                if !self.contains_edge(lhs, succ) {
                    work.push((lhs, succ));
                }
            }
        }
    }

    #[inline]
    pub fn contains_edge(&self, lhs: NodeId, rhs: NodeId) -> bool {
        self.slots[lhs.index()].downsets.contains(rhs)
    }

    /// Nodes reachable from `id`, in discovery order.
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slots[id.index()].downsets.iter()
    }

    /// Nodes that reach `id`, in discovery order.
    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slots[id.index()].upsets.iter()
    }

    #[inline]
    pub fn payload(&self, id: NodeId) -> &T {
        &self.slots[id.index()].payload
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total number of reachable pairs.
    pub fn edge_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.downsets.len()).sum()
    }

    /// Capture the current nodes and edges.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            len: self.slots.len(),
            edges: self
                .slots
                .iter()
                .map(|slot| (slot.upsets.clone(), slot.downsets.clone()))
                .collect(),
        }
    }

    /// Drop nodes added after `snapshot` and reinstate its edges.
    ///
    /// # Panics
    /// Panics if the arena shrank below the snapshot, which means snapshots
    /// were restored out of order.
    pub fn restore(&mut self, snapshot: Snapshot) {
        assert!(
            snapshot.len <= self.slots.len(),
            "restoring snapshot of {} nodes into arena of {}",
            snapshot.len,
            self.slots.len()
        );
        self.slots.truncate(snapshot.len);
        for (slot, (upsets, downsets)) in self.slots.iter_mut().zip(snapshot.edges) {
            slot.upsets = upsets;
            slot.downsets = downsets;
        }
    }
}

impl<T> Default for Reachability<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
