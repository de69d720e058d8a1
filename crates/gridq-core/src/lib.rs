//! GridQ Core - Query schema reconciliation for a distributed cache
//!
//! This crate computes the delta between a cache's current query schema and
//! a caller's desired schema, including:
//! - Immutable Type Descriptor and Cache Schema Configuration models
//! - An entity diff engine classifying changes as no-op, new, additive, or conflicting
//! - A closed, addressable schema operation family with cluster-wide dedup ids
//! - An immutable `SchemaPatch` aggregate with a frozen resulting configuration
//! - A reference applier enforcing ordering, at-most-once, and conflict gating
//!
//! The cluster exchange layer that broadcasts patches, the persistence of
//! applied schema state, and the trigger policy for schema changes are all
//! external collaborators and deliberately absent here.

pub mod apply;
pub mod compat;
pub mod diff;
pub mod errors;
pub mod logging;
pub mod model;
pub mod ops;
pub mod patch;

// Re-export commonly used types
pub use apply::{apply_patch, AppliedOperations, ApplyOutcome};
pub use compat::{CompatibilityPolicy, StrictCompatibility};
pub use errors::{Result, SchemaError};
pub use model::{CacheSchemaConfiguration, EntityIdentity, QueryEntity, QueryField, QueryIndex};
pub use ops::{SchemaOperation, SchemaOperationKind};
pub use patch::{build_patch, SchemaPatch};
