/*
    uset.rs - Unique-add set

    merge's three-way split on vector-clock comparison mirrors
    `xotl.crdt.sets.USet.__iadd__`; the precondition that no item is ever
    added twice across the cluster is the caller's responsibility, not
    enforced here (spec §4.7).
*/

use crate::clock::Clock;
use crate::process::Process;
use crate::vclock::VClock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// A set where the caller guarantees every item is added at most once
/// across the whole cluster, letting `merge` use plain union on the
/// concurrent branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct USet<T: Eq + Hash + Clone> {
    process: Process,
    vc: VClock,
    items: HashSet<T>,
}

impl<T: Eq + Hash + Clone> USet<T> {
    /// Construct an empty set owned by `process`.
    pub fn new(process: Process) -> Self {
        USet { process, vc: VClock::empty(), items: HashSet::new() }
    }

    /// Add `x`. The caller must ensure `x` is never added anywhere else
    /// in the cluster.
    pub fn add(&mut self, x: T, clock: &dyn Clock) {
        self.vc = self.vc.bump(&self.process, clock);
        self.items.insert(x);
    }

    /// Remove `x` if present.
    pub fn remove(&mut self, x: &T, clock: &dyn Clock) {
        if self.items.remove(x) {
            self.vc = self.vc.bump(&self.process, clock);
        }
    }

    /// Remove every item matching `pred`, bumping the vector clock at
    /// most once for the whole batch. Used by `ORSet::remove` to drop all
    /// tagged triples for a logical item as a single replica event.
    pub fn remove_matching(&mut self, mut pred: impl FnMut(&T) -> bool, clock: &dyn Clock) {
        let before = self.items.len();
        self.items.retain(|x| !pred(x));
        if self.items.len() != before {
            self.vc = self.vc.bump(&self.process, clock);
        }
    }

    /// The set's current contents.
    pub fn value(&self) -> &HashSet<T> {
        &self.items
    }

    /// Join this set's state with `other`'s.
    ///
    /// Exhaustive on the three possible relations between the two vector
    /// clocks: if `self` already descends from `other` there is nothing
    /// to learn; if `self` strictly precedes `other`, `other`'s items are
    /// authoritative; if the two are concurrent, union is safe because
    /// unique adds mean neither replica could have removed an item it
    /// never observed.
    pub fn merge(&mut self, other: &USet<T>) {
        if self.vc.descends(&other.vc) {
            // no change
        } else if other.vc.descends(&self.vc) {
            self.items = other.items.clone();
        } else {
            debug_assert!(self.vc.concurrent(&other.vc));
            self.items.extend(other.items.iter().cloned());
        }
        self.vc = self.vc.merge([&other.vc]);
    }

    /// True iff `self`'s vector clock is dominated by (or equal to)
    /// `other`'s.
    pub fn le(&self, other: &USet<T>) -> bool {
        other.vc.descends(&self.vc)
    }

    /// Access the underlying vector clock, for `ORSet`'s `le`/`merge`.
    pub fn vclock(&self) -> &VClock {
        &self.vc
    }

    /// The process that owns this replica.
    pub fn process(&self) -> &Process {
        &self.process
    }
}
