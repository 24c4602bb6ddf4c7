/*
    two_phase_set.rs - Add/remove-once set built from two GSets

    Fixes the original's `__le__`, which compared `alive` with `or`
    instead of requiring both components to hold (see DESIGN.md).
*/

use crate::gset::GSet;
use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// A set where removal is final: once an item is tombstoned it can never
/// reappear at any replica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoPhaseSet<T: Eq + Hash + Clone> {
    alive: GSet<T>,
    dead: GSet<T>,
}

impl<T: Eq + Hash + Clone> TwoPhaseSet<T> {
    /// Construct an empty set owned by `process`.
    pub fn new(process: Process) -> Self {
        TwoPhaseSet {
            alive: GSet::new(process.clone()),
            dead: GSet::new(process),
        }
    }

    /// Add `x` to the set.
    pub fn add(&mut self, x: T) {
        self.alive.add(x);
    }

    /// Remove `x` if it is currently alive and not already tombstoned.
    /// Returns whether the removal actually took effect.
    pub fn remove(&mut self, x: T) -> bool {
        if self.alive.value().contains(&x) && !self.dead.value().contains(&x) {
            self.dead.add(x);
            true
        } else {
            false
        }
    }

    /// The set's current value: items added but not removed.
    pub fn value(&self) -> HashSet<T> {
        self.alive
            .value()
            .difference(self.dead.value())
            .cloned()
            .collect()
    }

    /// Join this set's state with `other`'s, componentwise.
    pub fn merge(&mut self, other: &TwoPhaseSet<T>) {
        self.alive.merge(&other.alive);
        self.dead.merge(&other.dead);
    }

    /// True iff both components are dominated by (or equal to) `other`'s.
    pub fn le(&self, other: &TwoPhaseSet<T>) -> bool {
        self.alive.le(&other.alive) && self.dead.le(&other.dead)
    }
}
