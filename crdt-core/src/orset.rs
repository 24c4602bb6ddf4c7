/*
    orset.rs - Observed-remove set, built compositionally on USet

    Each logical add tags the value with (process, ticks) to make it
    unique, satisfying USet's no-repeat-add precondition; a remove drops
    every triple currently tagging the value but only bumps the vector
    clock once, so the whole batch counts as a single replica event.
*/

use crate::clock::Clock;
use crate::process::Process;
use crate::uset::USet;
use crate::vclock::VClock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// An observed-remove set: concurrent `add(x)` and `remove(x)` keep `x`,
/// since add always wins over a remove that never observed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ORSet<T: Eq + Hash + Clone> {
    process: Process,
    inner: USet<(T, String, u64)>,
    ticks: u64,
}

impl<T: Eq + Hash + Clone> ORSet<T> {
    /// Construct an empty set owned by `process`.
    pub fn new(process: Process) -> Self {
        ORSet {
            inner: USet::new(process.clone()),
            process,
            ticks: 0,
        }
    }

    /// Add `x` under a fresh per-replica tag.
    pub fn add(&mut self, x: T, clock: &dyn Clock) {
        self.ticks += 1;
        self.inner.add((x, self.process.name().to_string(), self.ticks), clock);
    }

    /// Remove every tagged triple currently present for `x`, as a single
    /// replica event. A no-op if `x` is not present.
    pub fn remove(&mut self, x: &T, clock: &dyn Clock) {
        self.inner.remove_matching(|(item, _, _)| item == x, clock);
    }

    /// The observable value: the tags projected away.
    pub fn value(&self) -> HashSet<T> {
        self.inner.value().iter().map(|(x, _, _)| x.clone()).collect()
    }

    /// Join this set's state with `other`'s.
    pub fn merge(&mut self, other: &ORSet<T>) {
        self.inner.merge(&other.inner);
    }

    /// True iff `self`'s underlying `USet` is dominated by `other`'s.
    pub fn le(&self, other: &ORSet<T>) -> bool {
        self.inner.le(&other.inner)
    }

    /// Access the underlying vector clock.
    pub fn vclock(&self) -> &VClock {
        self.inner.vclock()
    }
}
