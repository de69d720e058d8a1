//! Schema operation model
//!
//! The atomic unit of schema change: a closed variant family, each instance
//! immutable, addressed to one cache and schema, and carrying a globally
//! unique operation id for cluster-wide deduplication.

mod operation;

pub use operation::{SchemaOperation, SchemaOperationKind};
