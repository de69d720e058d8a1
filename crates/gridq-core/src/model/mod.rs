//! Immutable schema value types
//!
//! A [`QueryEntity`] describes one queryable record type of a cache; a
//! [`CacheSchemaConfiguration`] is the full set of entities plus cache-level
//! settings. Both are treated as values with structural equality, and all
//! collections serialize deterministically (`Vec` in declaration order,
//! `BTreeMap` for keyed data).

mod config;
mod entity;
mod index;

pub use config::{CacheSchemaConfiguration, DEFAULT_SCHEMA_NAME};
pub use entity::{EntityIdentity, QueryEntity, QueryField};
pub use index::{IndexField, IndexKind, QueryIndex};
