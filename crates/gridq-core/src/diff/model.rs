//! Structured diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Additions are reported in descriptor declaration order; aliases use
//! `BTreeMap` for deterministic serialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{QueryEntity, QueryField, QueryIndex};

/// One additive change to an existing entity
///
/// Payload only - the patch builder wraps each change into an addressed,
/// identified schema operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EntityChange {
    /// Fields present on the desired side only, in declaration order
    AddFields { fields: Vec<QueryField> },
    /// Indexes present on the desired side only, in definition order
    AddIndexes { indexes: Vec<QueryIndex> },
    /// Alias mappings present on the desired side only
    AddAliases { aliases: BTreeMap<String, String> },
}

/// Entity attribute a conflict refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictAttribute {
    Field,
    Alias,
    Index,
}

/// Why an attribute is in conflict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConflictReason {
    /// Field present on both sides with incompatible declared types
    TypeMismatch { existing: String, desired: String },
    /// Attribute present on the existing side but absent from the desired side
    Removed,
    /// Attribute present on both sides with a different definition
    Redefined,
}

/// One detected incompatibility between an existing and a desired descriptor
///
/// Conflicts are data, not errors: they accumulate on the patch and block
/// its application as a whole. The display string is produced only at the
/// boundary by [`render_conflicts`](crate::diff::render_conflicts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConflict {
    /// Entity label (value type name)
    pub entity: String,
    /// Which attribute kind is in conflict
    pub attribute: ConflictAttribute,
    /// Name of the offending field, alias, or index
    pub name: String,
    /// Why it conflicts
    pub reason: ConflictReason,
}

impl SchemaConflict {
    pub(crate) fn field(entity: &str, name: &str, reason: ConflictReason) -> Self {
        Self {
            entity: entity.to_string(),
            attribute: ConflictAttribute::Field,
            name: name.to_string(),
            reason,
        }
    }

    pub(crate) fn alias(entity: &str, name: &str, reason: ConflictReason) -> Self {
        Self {
            entity: entity.to_string(),
            attribute: ConflictAttribute::Alias,
            name: name.to_string(),
            reason,
        }
    }

    pub(crate) fn index(entity: &str, name: &str, reason: ConflictReason) -> Self {
        Self {
            entity: entity.to_string(),
            attribute: ConflictAttribute::Index,
            name: name.to_string(),
            reason,
        }
    }
}

/// Classification of one existing/desired descriptor pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EntityDiff {
    /// Descriptors are structurally identical - no operation, no conflict
    Unchanged,
    /// No existing descriptor - the whole entity is added
    New { entity: QueryEntity },
    /// Desired descriptor is a strict extension of the existing one
    Additive { changes: Vec<EntityChange> },
    /// At least one attribute was retyped, redefined, or removed
    Conflicted { conflicts: Vec<SchemaConflict> },
}
