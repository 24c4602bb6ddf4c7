//! Opaque state serialization boundary.
//!
//! Every CvRDT type derives `Serialize`/`Deserialize`; `encode`/`decode`
//! wrap `bincode` so replicas can exchange snapshots without either side
//! knowing the wire format. Round-tripping through `encode`/`decode` MUST
//! reproduce a value equal to the original.

use crate::error::{CrdtError, CrdtResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a CvRDT state to its opaque wire representation.
pub fn encode<T: Serialize>(value: &T) -> CrdtResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| CrdtError::InvalidInput(e.to_string()))
}

/// Deserialize a CvRDT state from its opaque wire representation.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CrdtResult<T> {
    bincode::deserialize(bytes).map_err(|e| CrdtError::InvalidInput(e.to_string()))
}
