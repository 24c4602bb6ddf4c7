//! Convergent replicated data types.
//!
//! A small library of CvRDTs — grow-only and positive-negative counters,
//! grow-only and two-phase sets, a unique-add set and the observed-remove
//! set built on top of it, and a last-write-wins register — plus the
//! vector clock algebra they all share. Every type exposes a constructor
//! taking a [`Process`], a `value()` projection, an in-place `merge`, and
//! the semilattice order (`le`); none of it touches the network, a clock
//! other than through the [`clock::Clock`] trait, or the filesystem.

pub mod clock;
pub mod codec;
pub mod error;
pub mod gcounter;
pub mod gset;
pub mod harness;
pub mod logging;
pub mod lww_register;
pub mod orset;
pub mod pncounter;
pub mod process;
pub mod two_phase_set;
pub mod uset;
pub mod vclock;

pub use clock::{Clock, FixedClock, SystemMonotonicClock};
pub use codec::{decode, encode};
pub use error::{CrdtError, CrdtResult};
pub use gcounter::GCounter;
pub use gset::GSet;
pub use lww_register::LWWRegister;
pub use orset::ORSet;
pub use pncounter::PNCounter;
pub use process::Process;
pub use two_phase_set::TwoPhaseSet;
pub use uset::USet;
pub use vclock::{Dot, VClock};
