/*
    lww_register.rs - Last-write-wins register

    The dominance ladder's third rung compares `self.vc` against
    `other.vc`; the original Python compared `self.vc` against itself,
    which made concurrent writes always keep `self`'s value (see
    DESIGN.md for the fix).
*/

use crate::clock::Clock;
use crate::process::Process;
use crate::vclock::VClock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

/// A register that resolves concurrent writes by vector clock, then
/// timestamp, then process total order.
///
/// `T` is required to be `Clone + PartialEq`, which in Rust's ownership
/// model already guarantees the "hashable/immutable value" precondition
/// the original dynamically-typed implementation checked at runtime
/// (raising `MutableValue`); there is no analogous failure mode here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LWWRegister<T: Clone + PartialEq> {
    process: Process,
    vc: VClock,
    atom: Option<T>,
    timestamp: u64,
}

impl<T: Clone + PartialEq> LWWRegister<T> {
    /// Construct a register owned by `process`, holding no value.
    pub fn new(process: Process) -> Self {
        LWWRegister { process, vc: VClock::empty(), atom: None, timestamp: 0 }
    }

    /// Set the register's value, bumping the vector clock and advancing
    /// the timestamp to `max(current, clock.now())`.
    pub fn set(&mut self, v: T, clock: &dyn Clock) {
        self.timestamp = self.timestamp.max(clock.now());
        self.vc = self.vc.bump(&self.process, clock);
        self.atom = Some(v);
    }

    /// Set the register's value with an explicit timestamp, bypassing
    /// the clock.
    pub fn set_at(&mut self, v: T, timestamp: u64) {
        self.timestamp = timestamp;
        self.vc = self.vc.bump_at(&self.process, timestamp);
        self.atom = Some(v);
    }

    /// The register's current value, if any.
    pub fn value(&self) -> Option<&T> {
        self.atom.as_ref()
    }

    /// Dominance predicate: true iff `other` should win over `self`.
    fn dominated_by(&self, other: &LWWRegister<T>) -> bool {
        let result = if self.vc.dominates(&other.vc) {
            false
        } else if other.vc.dominates(&self.vc) {
            true
        } else {
            match self.timestamp.cmp(&other.timestamp) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => other.process > self.process,
            }
        };
        trace!(dominated = result, self_ts = self.timestamp, other_ts = other.timestamp, "lww dominance decision");
        result
    }

    /// True iff `self`'s vector clock is dominated by (or equal to)
    /// `other`'s, matching the original's `__le__`/`__lt__` contract of
    /// comparing the two registers' vector clocks directly.
    pub fn le(&self, other: &LWWRegister<T>) -> bool {
        other.vc.descends(&self.vc)
    }

    /// Join this register's state with `other`'s.
    pub fn merge(&mut self, other: &LWWRegister<T>) {
        if self.dominated_by(other) {
            self.atom = other.atom.clone();
        }
        self.vc = self.vc.merge([&other.vc]);
        self.timestamp = self.timestamp.max(other.timestamp);
        trace!(process = %self.process, "lww register merged");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn later_vc_wins() {
        let clock = FixedClock::new(0);
        let mut a = LWWRegister::<&str>::new(Process::new("R0", 0));
        a.set("first", &clock);
        let mut b = a.clone();
        b.set("second", &clock);

        a.merge(&b);
        assert_eq!(a.value(), Some(&"second"));
    }

    #[test]
    fn concurrent_writes_break_tie_by_timestamp_then_process() {
        let mut a = LWWRegister::<&str>::new(Process::new("R0", 0));
        let mut b = LWWRegister::<&str>::new(Process::new("R1", 1));
        a.set_at("from-a", 5);
        b.set_at("from-b", 10);

        a.merge(&b);
        assert_eq!(a.value(), Some(&"from-b"));

        let mut c = LWWRegister::<&str>::new(Process::new("R0", 0));
        let mut d = LWWRegister::<&str>::new(Process::new("R1", 1));
        c.set_at("from-c", 5);
        d.set_at("from-d", 5);
        c.merge(&d);
        assert_eq!(c.value(), Some(&"from-d"));
    }

    #[test]
    fn le_tracks_the_underlying_vclock() {
        let clock = FixedClock::new(0);
        let mut a = LWWRegister::<&str>::new(Process::new("R0", 0));
        a.set("first", &clock);
        let mut b = a.clone();
        b.set("second", &clock);
        assert!(a.le(&b));
        assert!(!b.le(&a));

        let c = LWWRegister::<&str>::new(Process::new("R1", 1));
        assert!(c.le(&a));
    }

    #[test]
    fn merge_is_idempotent() {
        let clock = FixedClock::new(0);
        let mut a = LWWRegister::<&str>::new(Process::new("R0", 0));
        a.set("x", &clock);
        let snapshot = a.clone();
        a.merge(&snapshot);
        assert_eq!(a.value(), snapshot.value());
    }
}
