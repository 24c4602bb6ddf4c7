//! Error types for the CRDT subsystem
//!
//! Operations are total whenever possible; these are the conditions where
//! they aren't. `merge` between unrelated CRDT kinds, a missing actor in a
//! vector clock, or a mutable value handed to a LWW register all surface
//! here instead of being swallowed or coerced.

use thiserror::Error;

/// Errors that can occur while constructing or operating on a CRDT.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CrdtError {
    /// Constructor received malformed input, e.g. a dot sequence with a
    /// repeated process.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `VClock::find` was asked for a process that has no dot.
    #[error("no dot recorded for process {0:?}")]
    NotFound(String),

    /// `LWWRegister::set` was given a value that is not safely hashable
    /// (the register never re-derives equality from interior-mutable data).
    #[error("value is not immutable/hashable: {0}")]
    MutableValue(String),

    /// `merge` (or a comparison) was attempted between two values that are
    /// not instances of the same CRDT kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The kind the operation was invoked on.
        expected: &'static str,
        /// The kind of the operand actually supplied.
        found: &'static str,
    },

    /// A precondition of the operation was violated, e.g. `USet::add`
    /// called twice with the same item.
    #[error("precondition violated: {0}")]
    PreconditionViolated(String),
}

/// Convenience alias used throughout the crate.
pub type CrdtResult<T> = Result<T, CrdtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            CrdtError::NotFound("R0".into()).to_string(),
            "no dot recorded for process \"R0\""
        );
        assert_eq!(
            CrdtError::TypeMismatch { expected: "GCounter", found: "PNCounter" }.to_string(),
            "type mismatch: expected GCounter, found PNCounter"
        );
    }
}
