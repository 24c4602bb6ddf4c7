/*
    pncounter.rs - Increment/decrement counter, built from two GCounters
*/

use crate::clock::Clock;
use crate::gcounter::GCounter;
use crate::process::Process;
use serde::{Deserialize, Serialize};

/// A counter that can both increment and decrement, composed of a
/// positive and a negative `GCounter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PNCounter {
    pos: GCounter,
    neg: GCounter,
}

impl PNCounter {
    /// Construct a new counter owned by `process`, starting at zero.
    pub fn new(process: Process) -> Self {
        PNCounter {
            pos: GCounter::new(process.clone()),
            neg: GCounter::new(process),
        }
    }

    /// Increment the counter by one.
    pub fn incr(&mut self, clock: &dyn Clock) {
        self.pos.incr(clock);
    }

    /// Decrement the counter by one.
    pub fn decr(&mut self, clock: &dyn Clock) {
        self.neg.incr(clock);
    }

    /// The counter's value: `pos.value() - neg.value()`.
    pub fn value(&self) -> i64 {
        self.pos.value() as i64 - self.neg.value() as i64
    }

    /// Join this counter's state with `other`'s, componentwise.
    pub fn merge(&mut self, other: &PNCounter) {
        self.pos.merge(&other.pos);
        self.neg.merge(&other.neg);
    }

    /// True iff both components are dominated by (or equal to) `other`'s.
    pub fn le(&self, other: &PNCounter) -> bool {
        self.pos.le(&other.pos) && self.neg.le(&other.neg)
    }

    /// Reset both components to zero. A coordination-layer operation,
    /// same caveat as `GCounter::reset`: safe only when the caller has
    /// externally ensured no concurrent writer remains.
    pub fn reset(&mut self) {
        self.pos.reset();
        self.neg.reset();
    }
}
