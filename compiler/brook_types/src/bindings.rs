//! Scoped name bindings with exact undo.
//!
//! The table is a persistent map: cloning it is O(1) and the clone is
//! unaffected by later inserts on either side. Let-polymorphism relies on
//! that to capture the environment of a function definition for re-checking
//! at every use.

use std::fmt;
use std::rc::Rc;

use brook_ir::Name;
use rustc_hash::FxBuildHasher;

use crate::check::{PolyLet, PolyLetRec};
use crate::core::Value;

type BindingMap = im::HashMap<Name, Scheme, FxBuildHasher>;

/// What a name is bound to.
#[derive(Clone)]
pub enum Scheme {
    /// A single value shared by every use.
    Mono(Value),
    /// A let-bound function, re-checked at each use.
    Poly(Rc<PolyLet>),
    /// Member `index` of a mutually recursive group, re-checked at each use.
    PolyRec(Rc<PolyLetRec>, usize),
}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Mono(value) => write!(f, "Mono({value:?})"),
            Scheme::Poly(_) => write!(f, "Poly"),
            Scheme::PolyRec(_, index) => write!(f, "PolyRec({index})"),
        }
    }
}

/// Position in the undo log, see [`Bindings::unwind`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UnwindPoint(usize);

/// Name table plus the log needed to undo insertions.
#[derive(Clone, Default)]
pub struct Bindings {
    m: BindingMap,
    /// `(name, previous binding)` for every insert since the last commit.
    changes: Vec<(Name, Option<Scheme>)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: Name) -> Option<&Scheme> {
        self.m.get(&name)
    }

    pub fn contains(&self, name: Name) -> bool {
        self.m.contains_key(&name)
    }

    /// Number of visible names.
    pub fn len(&self) -> usize {
        self.m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    pub fn insert(&mut self, name: Name, value: Value) {
        self.insert_scheme(name, Scheme::Mono(value));
    }

    /// Bind `name`, shadowing any previous binding until unwound.
    pub fn insert_scheme(&mut self, name: Name, scheme: Scheme) {
        let previous = self.m.insert(name, scheme);
        self.changes.push((name, previous));
    }

    pub fn unwind_point(&self) -> UnwindPoint {
        UnwindPoint(self.changes.len())
    }

    /// Undo every insert made after `point`, newest first.
    pub fn unwind(&mut self, point: UnwindPoint) {
        while self.changes.len() > point.0 {
            let Some((name, previous)) = self.changes.pop() else {
                break;
            };
            match previous {
                Some(scheme) => {
                    self.m.insert(name, scheme);
                }
                None => {
                    self.m.remove(&name);
                }
            }
        }
    }

    /// Run `f` in a nested scope; its bindings are gone afterwards, whether
    /// `f` succeeded or not.
    pub fn in_child_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let point = self.unwind_point();
        let result = f(self);
        self.unwind(point);
        result
    }

    /// Make every binding since the last commit permanent.
    pub fn commit(&mut self) {
        self.changes.clear();
    }

    /// Number of inserts that [`unwind`](Self::unwind) could still undo.
    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }

    /// Independent copy of the visible bindings with an empty undo log.
    pub fn capture(&self) -> Bindings {
        Bindings {
            m: self.m.clone(),
            changes: Vec::new(),
        }
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("len", &self.m.len())
            .field("pending_changes", &self.changes.len())
            .finish()
    }
}
