/*
    vclock.rs - Dot and VClock

    Ported from the descends/equality/merge/bump algorithms of the
    original `xotl.crdt.clocks` module, re-expressed as owned Rust types
    instead of frozen dataclasses with operator overloads.
*/

use crate::clock::Clock;
use crate::error::{CrdtError, CrdtResult};
use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

/// A single process's event counter, with a timestamp carried for LWW but
/// never compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dot {
    process: Process,
    counter: u64,
    timestamp: u64,
}

impl Dot {
    /// Construct a dot directly. Used internally by `VClock`; the public
    /// entry points are `VClock::bump` and `VClock::find`.
    pub fn new(process: Process, counter: u64, timestamp: u64) -> Self {
        Dot { process, counter, timestamp }
    }

    /// The process this dot belongs to.
    pub fn process(&self) -> &Process {
        &self.process
    }

    /// The per-process event count.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// The timestamp carried alongside the counter. Not part of equality.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl PartialEq for Dot {
    fn eq(&self, other: &Self) -> bool {
        self.process == other.process && self.counter == other.counter
    }
}

impl Eq for Dot {}

/// A vector clock: a dot per process, sorted by process name, with
/// zero-counter dots treated as absent throughout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VClock {
    dots: Vec<Dot>,
}

impl VClock {
    /// The vector clock with no dots.
    pub fn empty() -> Self {
        VClock { dots: Vec::new() }
    }

    /// Construct a vector clock from an explicit dot list.
    ///
    /// Fails with `InvalidInput` if two dots share a process. Dots with
    /// counter zero are dropped, matching the original's "silly counters"
    /// guard.
    pub fn new(dots: Vec<Dot>) -> CrdtResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for d in &dots {
            if !seen.insert(d.process.name().to_string()) {
                return Err(CrdtError::InvalidInput(format!(
                    "repeated process {:?} in dot list",
                    d.process.name()
                )));
            }
        }
        let mut dots: Vec<Dot> = dots.into_iter().filter(|d| d.counter > 0).collect();
        dots.sort_by(|a, b| a.process.name().cmp(b.process.name()));
        Ok(VClock { dots })
    }

    /// Non-zero dots, sorted by process name.
    pub fn dots(&self) -> impl Iterator<Item = &Dot> {
        self.dots.iter().filter(|d| d.counter > 0)
    }

    /// True iff any dot has a counter greater than zero.
    pub fn is_empty(&self) -> bool {
        self.dots().next().is_none()
    }

    /// Return the dot recorded for `process`, or `NotFound`.
    pub fn find(&self, process: &Process) -> CrdtResult<&Dot> {
        self.dots
            .iter()
            .find(|d| d.process == *process)
            .ok_or_else(|| CrdtError::NotFound(process.name().to_string()))
    }

    /// Return a new vector clock with `process`'s counter incremented by
    /// one, using `clock` to source the timestamp when the process is new
    /// or its current timestamp would otherwise go backwards.
    pub fn bump(&self, process: &Process, clock: &dyn Clock) -> Self {
        let now = clock.now();
        let mut dots = self.dots.clone();
        match dots.iter_mut().find(|d| d.process == *process) {
            Some(d) => {
                d.counter += 1;
                d.timestamp = now.max(d.timestamp);
            }
            None => dots.push(Dot::new(process.clone(), 1, now)),
        }
        dots.sort_by(|a, b| a.process.name().cmp(b.process.name()));
        trace!(process = %process, timestamp = now, "vclock bumped");
        VClock { dots }
    }

    /// Return a new vector clock with `process`'s counter incremented by
    /// one, with an explicit caller-supplied timestamp (no "never go
    /// backwards" clamp, matching the original's `_timestamp` override).
    pub fn bump_at(&self, process: &Process, timestamp: u64) -> Self {
        let mut dots = self.dots.clone();
        match dots.iter_mut().find(|d| d.process == *process) {
            Some(d) => {
                d.counter += 1;
                d.timestamp = timestamp;
            }
            None => dots.push(Dot::new(process.clone(), 1, timestamp)),
        }
        dots.sort_by(|a, b| a.process.name().cmp(b.process.name()));
        VClock { dots }
    }

    /// Pointwise max-merge: the least common descendant of `self` and
    /// `others`. Associative, commutative, idempotent.
    pub fn merge<'a>(&self, others: impl IntoIterator<Item = &'a VClock>) -> Self {
        let mut by_process: std::collections::BTreeMap<String, Dot> = std::collections::BTreeMap::new();
        for d in self.dots.iter().chain(others.into_iter().flat_map(|o| o.dots.iter())) {
            by_process
                .entry(d.process.name().to_string())
                .and_modify(|existing| {
                    if d.counter > existing.counter {
                        existing.counter = d.counter;
                    }
                    if d.timestamp > existing.timestamp {
                        existing.timestamp = d.timestamp;
                    }
                })
                .or_insert_with(|| d.clone());
        }
        let dots: Vec<Dot> = by_process.into_values().collect();
        trace!(process_count = dots.len(), "vclock merged");
        VClock { dots }
    }

    /// True iff `self` happens after or equals `other` (descends from it).
    pub fn descends(&self, other: &VClock) -> bool {
        let theirs: Vec<&Dot> = other.dots().collect();
        let ours: Vec<&Dot> = self.dots().collect();
        if theirs.is_empty() {
            return true;
        }
        if ours.is_empty() {
            return false;
        }
        let mut oi = 0;
        for their_dot in &theirs {
            while oi < ours.len() && ours[oi].process.name() != their_dot.process.name() {
                oi += 1;
            }
            if oi >= ours.len() {
                return false;
            }
            if ours[oi].counter < their_dot.counter {
                return false;
            }
        }
        true
    }

    /// True iff neither vector clock descends from the other.
    pub fn concurrent(&self, other: &VClock) -> bool {
        !self.descends(other) && !other.descends(self)
    }

    /// True iff `self` strictly descends from `other` (`self >= other` and
    /// `self != other`).
    pub fn dominates(&self, other: &VClock) -> bool {
        self.descends(other) && self != other
    }
}

impl PartialEq for VClock {
    fn eq(&self, other: &Self) -> bool {
        let theirs: Vec<&Dot> = other.dots().collect();
        let ours: Vec<&Dot> = self.dots().collect();
        if theirs.len() != ours.len() {
            return false;
        }
        let mut oi = 0;
        for their_dot in &theirs {
            while oi < ours.len() && ours[oi].process.name() != their_dot.process.name() {
                oi += 1;
            }
            if oi >= ours.len() || ours[oi].counter != their_dot.counter {
                return false;
            }
            oi += 1;
        }
        true
    }
}

impl Eq for VClock {}

impl PartialOrd for VClock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.descends(other) {
            Some(Ordering::Greater)
        } else if other.descends(self) {
            Some(Ordering::Less)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn p(name: &str) -> Process {
        Process::new(name, 0)
    }

    #[test]
    fn empty_descends_from_empty() {
        let a = VClock::empty();
        let b = VClock::empty();
        assert!(a.descends(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn every_vc_descends_from_empty() {
        let clock = FixedClock::new(0);
        let a = VClock::empty().bump(&p("R0"), &clock);
        assert!(a.descends(&VClock::empty()));
        assert!(!VClock::empty().descends(&a));
    }

    #[test]
    fn bump_increments_matching_process_only() {
        let clock = FixedClock::new(0);
        let a = VClock::empty().bump(&p("R0"), &clock);
        let b = a.bump(&p("R0"), &clock);
        assert_eq!(b.find(&p("R0")).unwrap().counter(), 2);
    }

    #[test]
    fn merge_is_pointwise_max() {
        let clock = FixedClock::new(0);
        let a = VClock::empty().bump(&p("R0"), &clock).bump(&p("R0"), &clock);
        let b = VClock::empty().bump(&p("R1"), &clock);
        let merged = a.merge([&b]);
        assert_eq!(merged.find(&p("R0")).unwrap().counter(), 2);
        assert_eq!(merged.find(&p("R1")).unwrap().counter(), 1);
    }

    #[test]
    fn concurrent_clocks_neither_descend() {
        let clock = FixedClock::new(0);
        let a = VClock::empty().bump(&p("R0"), &clock);
        let b = VClock::empty().bump(&p("R1"), &clock);
        assert!(a.concurrent(&b));
    }

    #[test]
    fn find_missing_process_is_not_found() {
        let a = VClock::empty();
        assert!(matches!(a.find(&p("R0")), Err(CrdtError::NotFound(_))));
    }

    #[test]
    fn constructor_rejects_duplicate_process() {
        let dots = vec![Dot::new(p("R0"), 1, 0), Dot::new(p("R0"), 2, 0)];
        assert!(matches!(VClock::new(dots), Err(CrdtError::InvalidInput(_))));
    }

    #[test]
    fn zero_counter_dot_is_absent() {
        let dots = vec![Dot::new(p("R0"), 0, 0)];
        let vc = VClock::new(dots).unwrap();
        assert!(vc.is_empty());
        assert!(matches!(vc.find(&p("R0")), Err(CrdtError::NotFound(_))));
    }
}
