//! Schema patch construction
//!
//! [`build_patch`] is the sole reconciliation entry point: it diffs every
//! desired entity against the current schema, aggregates operations, new
//! entities, and conflicts into one immutable [`SchemaPatch`], and freezes
//! the configuration that would result from applying it.

mod builder;
mod model;

pub use builder::build_patch;
pub use model::SchemaPatch;
