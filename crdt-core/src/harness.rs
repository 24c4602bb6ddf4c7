//! Scenario-driving helpers for component C11's stateful machines.
//!
//! `crdt-core/tests/*.rs` builds `proptest` state machines directly on
//! top of these helpers; `crdt-harness` reuses them to replay a single
//! interleaving outside of `cargo test` when reproducing a convergence
//! failure found by the property tests.

use rand::seq::SliceRandom;
use rand::Rng;

/// A CvRDT replica exposing the two operations a synchronization round
/// needs: join with another replica's state, and the semilattice order.
pub trait Replica {
    /// In-place semilattice join with `other`'s state.
    fn merge(&mut self, other: &Self);

    /// True iff `self`'s semilattice position is dominated by (or equal
    /// to) `other`'s.
    fn le(&self, other: &Self) -> bool;
}

/// The sync-based machine's `synchronize()` command (spec §4.10): shuffle
/// the replicas into a line, propagate forward then backward, so every
/// replica ends up having observed every other.
pub fn synchronize_line<T: Replica + Clone>(replicas: &mut [T], rng: &mut impl Rng) {
    let n = replicas.len();
    if n < 2 {
        return;
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    for w in 0..order.len() - 1 {
        let (a, b) = (order[w], order[w + 1]);
        let snapshot = replicas[a].clone();
        replicas[b].merge(&snapshot);
    }
    for w in (0..order.len() - 1).rev() {
        let (a, b) = (order[w + 1], order[w]);
        let snapshot = replicas[a].clone();
        replicas[b].merge(&snapshot);
    }
}

/// After a full synchronization, every pair of replicas must have
/// converged: `a <= b <= a` for all pairs.
pub fn fully_converged<T: Replica>(replicas: &[T]) -> bool {
    for a in replicas {
        for b in replicas {
            if !(a.le(b) && b.le(a)) {
                return false;
            }
        }
    }
    true
}

macro_rules! impl_replica {
    ($ty:ty) => {
        impl<T: Eq + std::hash::Hash + Clone> Replica for $ty {
            fn merge(&mut self, other: &Self) {
                Self::merge(self, other)
            }
            fn le(&self, other: &Self) -> bool {
                Self::le(self, other)
            }
        }
    };
}

impl_replica!(crate::gset::GSet<T>);
impl_replica!(crate::two_phase_set::TwoPhaseSet<T>);
impl_replica!(crate::uset::USet<T>);
impl_replica!(crate::orset::ORSet<T>);

impl Replica for crate::gcounter::GCounter {
    fn merge(&mut self, other: &Self) {
        Self::merge(self, other)
    }
    fn le(&self, other: &Self) -> bool {
        Self::le(self, other)
    }
}

impl Replica for crate::pncounter::PNCounter {
    fn merge(&mut self, other: &Self) {
        Self::merge(self, other)
    }
    fn le(&self, other: &Self) -> bool {
        Self::le(self, other)
    }
}

impl<T: Clone + PartialEq> Replica for crate::lww_register::LWWRegister<T> {
    fn merge(&mut self, other: &Self) {
        Self::merge(self, other)
    }
    fn le(&self, other: &Self) -> bool {
        Self::le(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::gcounter::GCounter;
    use crate::process::Process;
    use rand::SeedableRng;

    #[test]
    fn synchronize_line_converges_gcounters() {
        let clock = FixedClock::new(0);
        let mut replicas: Vec<GCounter> = (0..5)
            .map(|i| GCounter::new(Process::new(format!("R{i}"), i)))
            .collect();
        for r in &mut replicas {
            r.incr(&clock);
            r.incr(&clock);
        }

        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        synchronize_line(&mut replicas, &mut rng);

        assert!(fully_converged(&replicas));
        let values: Vec<u64> = replicas.iter().map(|r| r.value()).collect();
        assert!(values.iter().all(|v| *v == values[0]));
        assert_eq!(values[0], 10);
    }
}
