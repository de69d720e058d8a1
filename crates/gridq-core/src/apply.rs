//! Reference patch applier
//!
//! The cluster exchange layer owns real application (ordering across nodes,
//! retries, recovery). This module makes its contract executable in-process:
//! operations apply in emitted sequence order, each operation id takes
//! effect at most once via an explicit journal of applied identifiers, and
//! a conflicted patch is refused in whole before the target is touched.
//!
//! ## Atomicity contract
//!
//! `apply_patch` validates the patch against the configuration before
//! mutating anything: if it returns `Err`, the configuration is unchanged.

use std::collections::HashSet;

use tracing::debug;

use gridq_core_types::OperationId;

use crate::errors::{Result, SchemaError};
use crate::model::CacheSchemaConfiguration;
use crate::ops::{SchemaOperation, SchemaOperationKind};
use crate::patch::SchemaPatch;

/// Journal of already-applied operation identifiers
///
/// The at-most-once guarantee lives here, not in the operations themselves:
/// an applier consults the journal before every operation and records the
/// id after it takes effect. Persistence of the journal is the exchange
/// layer's concern; this in-memory set models one node's view.
#[derive(Debug, Clone, Default)]
pub struct AppliedOperations {
    ids: HashSet<OperationId>,
}

impl AppliedOperations {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the operation id has already taken effect
    pub fn contains(&self, id: OperationId) -> bool {
        self.ids.contains(&id)
    }

    /// Record an operation id; returns false if it was already present
    pub fn record(&mut self, id: OperationId) -> bool {
        self.ids.insert(id)
    }

    /// Number of recorded identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no identifier has been recorded
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Counts of what one apply pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyOutcome {
    /// Operations and entity additions that took effect
    pub applied: usize,
    /// Operations and entity additions skipped as already applied
    pub skipped: usize,
}

/// Apply a patch to a local configuration
///
/// # Errors
///
/// - `ConflictedPatch` - the patch has a non-empty conflict report; nothing
///   is applied
/// - `CacheMismatch` - an operation is addressed to a different cache
/// - `EntityNotFound` - an additive operation targets an entity absent from
///   the configuration
/// - `EntityAlreadyExists` - an add-entity operation targets an identity
///   that is already registered under a different logical change
pub fn apply_patch(
    config: &mut CacheSchemaConfiguration,
    patch: &SchemaPatch,
    journal: &mut AppliedOperations,
) -> Result<ApplyOutcome> {
    if patch.has_conflicts() {
        return Err(SchemaError::ConflictedPatch {
            cache_name: config.name.clone(),
            conflicts: patch.conflicts_message(),
        });
    }

    // Validate before mutating so a failed apply leaves the config unchanged
    for op in patch.operations() {
        check_operation(config, journal, op)?;
    }

    let mut outcome = ApplyOutcome::default();

    for entity in patch.entities_to_add() {
        if config.contains_entity(&entity.identity()) {
            // Re-delivered patch: the entity already arrived
            outcome.skipped += 1;
        } else {
            config.query_entities.push(entity.clone());
            outcome.applied += 1;
        }
    }

    for op in patch.operations() {
        if !journal.record(op.operation_id()) {
            outcome.skipped += 1;
            continue;
        }
        apply_operation(config, op);
        outcome.applied += 1;
        debug!(
            component = "applier",
            cache_name = %config.name,
            operation_id = %op.operation_id(),
            "schema operation applied"
        );
    }

    Ok(outcome)
}

/// Pre-flight check for one operation against the target configuration
fn check_operation(
    config: &CacheSchemaConfiguration,
    journal: &AppliedOperations,
    op: &SchemaOperation,
) -> Result<()> {
    if op.cache_name() != config.name {
        return Err(SchemaError::CacheMismatch {
            operation_id: op.operation_id().to_string(),
            target_cache: op.cache_name().to_string(),
            actual_cache: config.name.clone(),
        });
    }

    if journal.contains(op.operation_id()) {
        // Replay of an applied operation is always acceptable
        return Ok(());
    }

    match op.kind() {
        SchemaOperationKind::AddEntity { entity } => {
            if config.contains_entity(&entity.identity()) {
                return Err(SchemaError::EntityAlreadyExists {
                    cache_name: config.name.clone(),
                    entity: entity.identity().to_string(),
                });
            }
        }
        SchemaOperationKind::AddFields { entity, .. }
        | SchemaOperationKind::AddIndexes { entity, .. }
        | SchemaOperationKind::AddAliases { entity, .. } => {
            if !config.contains_entity(entity) {
                return Err(SchemaError::EntityNotFound {
                    cache_name: config.name.clone(),
                    entity: entity.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Apply one pre-checked operation; exhaustive over the variant family
fn apply_operation(config: &mut CacheSchemaConfiguration, op: &SchemaOperation) {
    match op.kind() {
        SchemaOperationKind::AddEntity { entity } => {
            config.query_entities.push(entity.clone());
        }
        SchemaOperationKind::AddFields { entity, fields } => {
            if let Some(target) = config.find_entity_mut(entity) {
                for field in fields {
                    target.add_field(field.clone());
                }
            }
        }
        SchemaOperationKind::AddIndexes { entity, indexes } => {
            if let Some(target) = config.find_entity_mut(entity) {
                for index in indexes {
                    target.add_index(index.clone());
                }
            }
        }
        SchemaOperationKind::AddAliases { entity, aliases } => {
            if let Some(target) = config.find_entity_mut(entity) {
                for (field, alias) in aliases {
                    target.add_alias(field.clone(), alias.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::StrictCompatibility;
    use crate::model::QueryEntity;
    use crate::patch::build_patch;

    fn person() -> QueryEntity {
        QueryEntity::new("java.lang.Integer", "Person")
            .with_field("id", "int")
            .with_field("name", "string")
    }

    #[test]
    fn test_apply_is_idempotent_under_journal() {
        let current = CacheSchemaConfiguration::new("persons").with_entity(person());
        let desired =
            CacheSchemaConfiguration::new("persons").with_entity(person().with_field("age", "int"));
        let patch = build_patch(Some(&current), &desired, &StrictCompatibility);

        let mut config = current.clone();
        let mut journal = AppliedOperations::new();

        let first = apply_patch(&mut config, &patch, &mut journal).unwrap();
        assert_eq!(first.applied, 1);
        assert_eq!(first.skipped, 0);

        // Retransmission: same patch, same journal
        let second = apply_patch(&mut config, &patch, &mut journal).unwrap();
        assert_eq!(second.applied, 0);
        assert_eq!(second.skipped, 1);

        // The field arrived exactly once
        let entity = config.find_entity(&person().identity()).unwrap();
        assert_eq!(entity.fields.iter().filter(|f| f.name == "age").count(), 1);
    }

    #[test]
    fn test_conflicted_patch_is_refused_whole() {
        let current = CacheSchemaConfiguration::new("persons").with_entity(person());
        let desired = CacheSchemaConfiguration::new("persons")
            .with_entity(
                QueryEntity::new("java.lang.Integer", "Person")
                    .with_field("id", "string")
                    .with_field("name", "string"),
            )
            .with_entity(QueryEntity::new("int", "Order").with_field("id", "int"));
        let patch = build_patch(Some(&current), &desired, &StrictCompatibility);

        let mut config = current.clone();
        let mut journal = AppliedOperations::new();
        let err = apply_patch(&mut config, &patch, &mut journal).unwrap_err();

        assert!(matches!(err, SchemaError::ConflictedPatch { .. }));
        // Not even the non-conflicting Order entity was added
        assert_eq!(config, current);
        assert!(journal.is_empty());
    }

    #[test]
    fn test_operation_for_other_cache_is_rejected_before_mutation() {
        let current = CacheSchemaConfiguration::new("persons").with_entity(person());
        let desired =
            CacheSchemaConfiguration::new("persons").with_entity(person().with_field("age", "int"));
        let patch = build_patch(Some(&current), &desired, &StrictCompatibility);

        let mut other = CacheSchemaConfiguration::new("orders").with_entity(person());
        let mut journal = AppliedOperations::new();
        let err = apply_patch(&mut other, &patch, &mut journal).unwrap_err();

        assert!(matches!(err, SchemaError::CacheMismatch { .. }));
        assert_eq!(other.query_entities.len(), 1);
    }

    #[test]
    fn test_additive_operation_without_target_entity_fails() {
        let current = CacheSchemaConfiguration::new("persons").with_entity(person());
        let desired =
            CacheSchemaConfiguration::new("persons").with_entity(person().with_field("age", "int"));
        let patch = build_patch(Some(&current), &desired, &StrictCompatibility);

        // Target configuration lost the Person entity
        let mut config = CacheSchemaConfiguration::new("persons");
        let mut journal = AppliedOperations::new();
        let err = apply_patch(&mut config, &patch, &mut journal).unwrap_err();

        assert!(matches!(err, SchemaError::EntityNotFound { .. }));
    }

    #[test]
    fn test_add_entity_operation_registers_entity_at_most_once() {
        // Whole-entity registration issued directly by an external layer,
        // not through the builder's entities_to_add channel
        let order = QueryEntity::new("java.lang.Integer", "Order").with_field("id", "int");
        let op = SchemaOperation::new(
            "persons",
            "PUBLIC",
            SchemaOperationKind::AddEntity {
                entity: order.clone(),
            },
        );
        let patch = SchemaPatch::new(vec![op], Vec::new(), Vec::new(), None);

        let mut config = CacheSchemaConfiguration::new("persons").with_entity(person());
        let mut journal = AppliedOperations::new();

        let first = apply_patch(&mut config, &patch, &mut journal).unwrap();
        assert_eq!(first.applied, 1);
        assert!(config.contains_entity(&order.identity()));

        // Retransmission of the same logical change is a journaled no-op
        let second = apply_patch(&mut config, &patch, &mut journal).unwrap();
        assert_eq!(second.applied, 0);
        assert_eq!(second.skipped, 1);
        let registrations = config
            .query_entities
            .iter()
            .filter(|e| e.identity() == order.identity())
            .count();
        assert_eq!(registrations, 1);
    }

    #[test]
    fn test_add_entity_for_registered_identity_is_rejected() {
        // A fresh operation id targeting an already-registered identity is
        // a distinct logical change, not a replay
        let op = SchemaOperation::new(
            "persons",
            "PUBLIC",
            SchemaOperationKind::AddEntity { entity: person() },
        );
        let patch = SchemaPatch::new(vec![op], Vec::new(), Vec::new(), None);

        let mut config = CacheSchemaConfiguration::new("persons").with_entity(person());
        let mut journal = AppliedOperations::new();

        let err = apply_patch(&mut config, &patch, &mut journal).unwrap_err();
        assert!(matches!(err, SchemaError::EntityAlreadyExists { .. }));
        assert_eq!(config.query_entities.len(), 1);
        assert!(journal.is_empty());
    }

    #[test]
    fn test_apply_reaches_frozen_resulting_configuration() {
        let current = CacheSchemaConfiguration::new("persons").with_entity(person());
        let desired = CacheSchemaConfiguration::new("persons")
            .with_entity(person().with_field("age", "int"))
            .with_entity(QueryEntity::new("int", "Order").with_field("id", "int"));
        let patch = build_patch(Some(&current), &desired, &StrictCompatibility);

        let mut config = current.clone();
        let mut journal = AppliedOperations::new();
        apply_patch(&mut config, &patch, &mut journal).unwrap();

        assert_eq!(Some(&config), patch.resulting_configuration());
    }
}
