/*
    gset.rs - Grow-only set
*/

use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// A set that only ever grows, merged by union.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GSet<T: Eq + Hash + Clone> {
    process: Process,
    items: HashSet<T>,
}

impl<T: Eq + Hash + Clone> GSet<T> {
    /// Construct an empty set owned by `process`.
    pub fn new(process: Process) -> Self {
        GSet { process, items: HashSet::new() }
    }

    /// Insert `x`. A no-op if already present.
    pub fn add(&mut self, x: T) {
        self.items.insert(x);
    }

    /// An immutable snapshot of the set's contents.
    pub fn value(&self) -> &HashSet<T> {
        &self.items
    }

    /// Join this set's state with `other`'s: union.
    pub fn merge(&mut self, other: &GSet<T>) {
        self.items.extend(other.items.iter().cloned());
    }

    /// True iff `self`'s items are a subset of `other`'s.
    pub fn le(&self, other: &GSet<T>) -> bool {
        self.items.is_subset(&other.items)
    }

    /// The process that owns this replica.
    pub fn process(&self) -> &Process {
        &self.process
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_union() {
        let mut a = GSet::<&str>::new(Process::new("R0", 0));
        let mut b = GSet::<&str>::new(Process::new("R1", 0));
        a.add("x");
        b.add("y");
        a.merge(&b);
        assert_eq!(a.value().len(), 2);
        assert!(a.value().contains("x"));
        assert!(a.value().contains("y"));
    }

    #[test]
    fn le_is_subset() {
        let mut a = GSet::<&str>::new(Process::new("R0", 0));
        let mut b = GSet::<&str>::new(Process::new("R1", 0));
        a.add("x");
        b.add("x");
        b.add("y");
        assert!(a.le(&b));
        assert!(!b.le(&a));
    }
}
