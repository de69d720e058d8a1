//! Patch builder - orchestrates the diff engine across a whole cache.

use std::collections::BTreeMap;

use tracing::debug;

use gridq_core_types::{telemetry, RequestId};

use crate::compat::CompatibilityPolicy;
use crate::diff::{diff_entity, EntityChange, EntityDiff, SchemaConflict};
use crate::model::{CacheSchemaConfiguration, EntityIdentity, QueryEntity};
use crate::ops::{SchemaOperation, SchemaOperationKind};
use crate::patch::SchemaPatch;

/// Build the schema patch taking a cache from `current` to `desired`
///
/// Every desired entity is diffed against the existing entity with the same
/// key/value type identity (or against absence). Diffing never
/// short-circuits: conflicts anywhere do not stop the remaining entities
/// from being inspected, so the conflict report is complete in one pass.
///
/// The builder itself never fails - schema incompatibility is data on the
/// returned patch, not an error. Each invocation works on its own local
/// accumulators; concurrent builds for different caches need no
/// coordination. Serializing concurrent builds for the *same* cache is the
/// caller's responsibility: `current` must be a stable snapshot for the
/// duration of one build.
pub fn build_patch(
    current: Option<&CacheSchemaConfiguration>,
    desired: &CacheSchemaConfiguration,
    policy: &dyn CompatibilityPolicy,
) -> SchemaPatch {
    let request_id = RequestId::new();
    debug!(
        component = "patch_builder",
        request_id = %request_id,
        cache_name = %desired.name,
        schema_name = desired.schema_name(),
        event = telemetry::EVENT_START,
        desired_entities = desired.query_entities.len(),
    );

    let existing_by_identity: BTreeMap<EntityIdentity, &QueryEntity> = current
        .map(|config| {
            config
                .query_entities
                .iter()
                .map(|e| (e.identity(), e))
                .collect()
        })
        .unwrap_or_default();

    let mut operations: Vec<SchemaOperation> = Vec::new();
    let mut entities_to_add: Vec<QueryEntity> = Vec::new();
    let mut conflicts: Vec<SchemaConflict> = Vec::new();
    let mut additive: Vec<(EntityIdentity, Vec<EntityChange>)> = Vec::new();

    for entity in &desired.query_entities {
        let identity = entity.identity();
        let existing = existing_by_identity.get(&identity).copied();

        match diff_entity(existing, entity, policy) {
            EntityDiff::Unchanged => {}
            EntityDiff::New { entity } => entities_to_add.push(entity),
            EntityDiff::Additive { changes } => {
                for change in &changes {
                    operations.push(SchemaOperation::new(
                        desired.name.clone(),
                        desired.schema_name(),
                        operation_kind(&identity, change.clone()),
                    ));
                }
                additive.push((identity, changes));
            }
            EntityDiff::Conflicted {
                conflicts: entity_conflicts,
            } => conflicts.extend(entity_conflicts),
        }
    }

    let resulting =
        resulting_configuration(current, desired, &entities_to_add, &additive);

    debug!(
        component = "patch_builder",
        request_id = %request_id,
        cache_name = %desired.name,
        event = telemetry::EVENT_END,
        ops_len = operations.len(),
        entities_to_add_len = entities_to_add.len(),
        conflicts_len = conflicts.len(),
    );

    SchemaPatch::new(operations, entities_to_add, conflicts, Some(&resulting))
}

/// Wrap one per-entity additive change into an addressed operation payload
fn operation_kind(identity: &EntityIdentity, change: EntityChange) -> SchemaOperationKind {
    match change {
        EntityChange::AddFields { fields } => SchemaOperationKind::AddFields {
            entity: identity.clone(),
            fields,
        },
        EntityChange::AddIndexes { indexes } => SchemaOperationKind::AddIndexes {
            entity: identity.clone(),
            indexes,
        },
        EntityChange::AddAliases { aliases } => SchemaOperationKind::AddAliases {
            entity: identity.clone(),
            aliases,
        },
    }
}

/// Compute the configuration that would result from applying the patch
///
/// Computed regardless of conflicts so callers can inspect what would have
/// resulted; conflicted entities keep their existing definition. When no
/// current configuration exists, the desired configuration itself is the
/// base - all of its entities arrive through `entities_to_add`.
fn resulting_configuration(
    current: Option<&CacheSchemaConfiguration>,
    desired: &CacheSchemaConfiguration,
    entities_to_add: &[QueryEntity],
    additive: &[(EntityIdentity, Vec<EntityChange>)],
) -> CacheSchemaConfiguration {
    let mut resulting = match current {
        Some(config) => config.clone(),
        None => CacheSchemaConfiguration {
            name: desired.name.clone(),
            sql_schema: desired.sql_schema.clone(),
            query_entities: Vec::new(),
            settings: desired.settings.clone(),
        },
    };

    for entity in entities_to_add {
        if !resulting.contains_entity(&entity.identity()) {
            resulting.query_entities.push(entity.clone());
        }
    }

    for (identity, changes) in additive {
        let Some(entity) = resulting.find_entity_mut(identity) else {
            // Additive changes always target an entity present in `current`
            continue;
        };
        for change in changes {
            match change {
                EntityChange::AddFields { fields } => {
                    for field in fields {
                        entity.add_field(field.clone());
                    }
                }
                EntityChange::AddIndexes { indexes } => {
                    for index in indexes {
                        entity.add_index(index.clone());
                    }
                }
                EntityChange::AddAliases { aliases } => {
                    for (field, alias) in aliases {
                        entity.add_alias(field.clone(), alias.clone());
                    }
                }
            }
        }
    }

    resulting
}
