use serde::{Deserialize, Serialize};

use crate::diff::{render_conflicts, SchemaConflict};
use crate::model::{CacheSchemaConfiguration, QueryEntity};
use crate::ops::SchemaOperation;

/// Immutable result of one schema reconciliation pass
///
/// A patch is constructed once, never mutated, and freely shareable across
/// threads. Consumers must apply `operations()` in sequence order, use each
/// operation's id for at-most-once effect, and refuse to apply any part of
/// a patch whose conflict report is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaPatch {
    operations: Vec<SchemaOperation>,
    entities_to_add: Vec<QueryEntity>,
    conflicts: Vec<SchemaConflict>,
    resulting_configuration: Option<CacheSchemaConfiguration>,
}

impl SchemaPatch {
    /// Create a patch
    ///
    /// The resulting configuration is deep-copied: later mutation of the
    /// caller's configuration never changes a patch already constructed.
    pub fn new(
        operations: Vec<SchemaOperation>,
        entities_to_add: Vec<QueryEntity>,
        conflicts: Vec<SchemaConflict>,
        resulting_configuration: Option<&CacheSchemaConfiguration>,
    ) -> Self {
        Self {
            operations,
            entities_to_add,
            conflicts,
            resulting_configuration: resulting_configuration.cloned(),
        }
    }

    /// True if any conflict was detected anywhere in the desired schema
    ///
    /// A conflicted patch is entirely inapplicable - conflicts are not
    /// partitioned per entity.
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Structured conflict records
    pub fn conflicts(&self) -> &[SchemaConflict] {
        &self.conflicts
    }

    /// Human-readable conflict report, one line per conflict
    ///
    /// Empty exactly when `has_conflicts()` is false; rendered on access,
    /// never cached.
    pub fn conflicts_message(&self) -> String {
        render_conflicts(&self.conflicts)
    }

    /// True if the patch changes nothing (no operations, no new entities)
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.entities_to_add.is_empty()
    }

    /// Operations in application order
    pub fn operations(&self) -> &[SchemaOperation] {
        &self.operations
    }

    /// Entities to register by whole (brand-new types)
    pub fn entities_to_add(&self) -> &[QueryEntity] {
        &self.entities_to_add
    }

    /// Frozen configuration as it would look after applying this patch
    ///
    /// Present whenever an equivalent configuration was constructible when
    /// the patch was built; computed even for conflicted patches so callers
    /// can inspect what would have resulted.
    pub fn resulting_configuration(&self) -> Option<&CacheSchemaConfiguration> {
        self.resulting_configuration.as_ref()
    }
}
