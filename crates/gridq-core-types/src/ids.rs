//! Identifier types for schema operations and request correlation
//!
//! An `OperationId` is the cluster-wide deduplication key for a schema
//! operation: two operations with the same id must be treated as the same
//! logical change by every consumer. A `RequestId` only correlates log
//! events for one reconciliation request and never travels on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally unique identifier for a single schema operation
///
/// Random 128-bit (UUID v4). Minted exactly once per emitted operation and
/// never reused across logically distinct changes. Appliers use it to
/// guarantee at-most-once effect under retransmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationId(Uuid);

impl OperationId {
    /// Mint a new random OperationId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Create from an existing UUID (for deserialization and replay journals)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one reconciliation request, used for log correlation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new RequestId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
