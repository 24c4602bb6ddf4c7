//! Monotonic clock abstraction.
//!
//! The core never reads the wall clock: `VClock::bump` and
//! `LWWRegister::set` only need a value that is non-decreasing within a
//! single replica. Network transport, persistence and actor issuance are
//! external collaborators per spec; so is the clock reader. Production code
//! uses [`SystemMonotonicClock`]; tests use [`FixedClock`] to pin timestamps
//! for deterministic regression scenarios.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A source of non-decreasing timestamps for a single replica.
pub trait Clock {
    /// Return a timestamp that is `>=` every value previously returned by
    /// this same clock instance.
    fn now(&self) -> u64;
}

/// Default clock, backed by [`std::time::Instant`].
///
/// Ticks are microseconds since the clock was created, which keeps the
/// counter monotonic per the `std::time::Instant` guarantee without
/// depending on wall-clock time (which may jump backwards across replicas).
#[derive(Debug)]
pub struct SystemMonotonicClock {
    origin: Instant,
}

impl SystemMonotonicClock {
    /// Create a new clock anchored at the current instant.
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemMonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemMonotonicClock {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// A deterministic test clock whose `now()` advances by one on every call,
/// starting from a configurable base.
#[derive(Debug)]
pub struct FixedClock {
    next: AtomicU64,
}

impl FixedClock {
    /// Create a clock whose first reading is `start`.
    pub fn new(start: u64) -> Self {
        Self { next: AtomicU64::new(start) }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_strictly_increasing() {
        let clock = FixedClock::new(10);
        assert_eq!(clock.now(), 10);
        assert_eq!(clock.now(), 11);
        assert_eq!(clock.now(), 12);
    }

    #[test]
    fn system_clock_is_non_decreasing() {
        let clock = SystemMonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
