/*
    gcounter.rs - Grow-only counter
*/

use crate::clock::Clock;
use crate::process::Process;
use crate::vclock::VClock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A counter that only ever increases, backed by a vector clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GCounter {
    process: Process,
    vc: VClock,
}

impl GCounter {
    /// Construct a new counter owned by `process`, starting at zero.
    pub fn new(process: Process) -> Self {
        GCounter { process, vc: VClock::empty() }
    }

    /// Increment the counter by one.
    pub fn incr(&mut self, clock: &dyn Clock) {
        self.vc = self.vc.bump(&self.process, clock);
    }

    /// The sum of every process's dot counter.
    pub fn value(&self) -> u64 {
        self.vc.dots().map(|d| d.counter()).sum()
    }

    /// Join this counter's state with `other`'s.
    pub fn merge(&mut self, other: &GCounter) {
        self.vc = self.vc.merge([&other.vc]);
        debug!(process = %self.process, value = self.value(), "gcounter merged");
    }

    /// True iff `self`'s state is dominated by (or equal to) `other`'s.
    pub fn le(&self, other: &GCounter) -> bool {
        other.vc.descends(&self.vc)
    }

    /// Reset the counter to zero. A coordination-layer operation: safe
    /// only when the caller has externally ensured no concurrent writer
    /// remains, see spec §9.
    pub fn reset(&mut self) {
        self.vc = VClock::empty();
    }

    /// Access the underlying vector clock, e.g. for `PNCounter::merge`.
    pub fn vclock(&self) -> &VClock {
        &self.vc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn incr_is_monotonic() {
        let clock = FixedClock::new(0);
        let mut c = GCounter::new(Process::new("R0", 0));
        assert_eq!(c.value(), 0);
        c.incr(&clock);
        c.incr(&clock);
        assert_eq!(c.value(), 2);
    }

    #[test]
    fn merge_is_commutative_and_idempotent() {
        let clock = FixedClock::new(0);
        let mut a = GCounter::new(Process::new("R0", 0));
        let mut b = GCounter::new(Process::new("R1", 0));
        a.incr(&clock);
        b.incr(&clock);
        b.incr(&clock);

        let mut merged_ab = a.clone();
        merged_ab.merge(&b);
        let mut merged_ba = b.clone();
        merged_ba.merge(&a);
        assert_eq!(merged_ab.value(), merged_ba.value());
        assert_eq!(merged_ab.value(), 3);

        let mut idempotent = merged_ab.clone();
        idempotent.merge(&merged_ab);
        assert_eq!(idempotent.value(), merged_ab.value());
    }
}
