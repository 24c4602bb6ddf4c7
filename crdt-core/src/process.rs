/*
    process.rs - Replica identity

    A Process is the identity of a single replica. Names MUST be unique
    within the cluster for their lifetime and MUST NOT be reused: vector
    clocks and LWW tie-breaks assume a process name never means two
    different replicas across the cluster's history.
*/

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identity of a replica.
///
/// Equality is by `name` alone; the total order used for tie-breaking
/// (in `LWWRegister`) is `(order, name)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    name: String,
    order: i64,
}

impl Process {
    /// Construct a new process identity.
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Process { name: name.into(), order }
    }

    /// The process's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The process's tie-break order.
    pub fn order(&self) -> i64 {
        self.order
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Process {}

impl std::hash::Hash for Process {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Process {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Process {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.order, &self.name).cmp(&(other.order, &other.name))
    }
}
