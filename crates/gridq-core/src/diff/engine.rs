//! Entity diff computation.
//!
//! The entry point is [`diff_entity`], a pure function over two descriptors
//! and the compatibility policy. It never short-circuits: every attribute
//! of a conflicted entity is inspected so the conflict report is complete
//! in a single pass.

use std::collections::BTreeMap;

use tracing::debug;

use crate::compat::CompatibilityPolicy;
use crate::diff::model::{ConflictReason, EntityChange, EntityDiff, SchemaConflict};
use crate::model::{QueryEntity, QueryField, QueryIndex};

/// Compare an existing descriptor (or absence) against a desired descriptor
///
/// Both descriptors must carry the same key/value type identity; the caller
/// (the patch builder) matches them before invoking the engine.
///
/// Classification:
/// - `Unchanged` - structurally identical, or differing only in declaration
///   order (same attributes, nothing to add, nothing in conflict)
/// - `New` - no existing descriptor; the whole entity is returned for
///   addition rather than decomposed into per-attribute operations
/// - `Additive` - desired is a strict extension; only the additions are
///   returned, fields first, then indexes, then aliases
/// - `Conflicted` - an attribute was retyped, redefined, or removed; no
///   changes are returned for this entity
pub fn diff_entity(
    existing: Option<&QueryEntity>,
    desired: &QueryEntity,
    policy: &dyn CompatibilityPolicy,
) -> EntityDiff {
    let Some(existing) = existing else {
        debug!(
            component = "diff_engine",
            entity = desired.label(),
            "entity is new, adding by whole"
        );
        return EntityDiff::New {
            entity: desired.clone(),
        };
    };

    if existing == desired {
        return EntityDiff::Unchanged;
    }

    let entity = existing.label();
    let mut conflicts: Vec<SchemaConflict> = Vec::new();

    // Existing fields must survive with a compatible declaration
    for field in &existing.fields {
        match desired.find_field(&field.name) {
            None => {
                conflicts.push(SchemaConflict::field(
                    entity,
                    &field.name,
                    ConflictReason::Removed,
                ));
            }
            Some(d) => {
                if !policy.is_compatible(&field.type_name, &d.type_name) {
                    conflicts.push(SchemaConflict::field(
                        entity,
                        &field.name,
                        ConflictReason::TypeMismatch {
                            existing: field.type_name.clone(),
                            desired: d.type_name.clone(),
                        },
                    ));
                } else if field.not_null != d.not_null {
                    conflicts.push(SchemaConflict::field(
                        entity,
                        &field.name,
                        ConflictReason::Redefined,
                    ));
                }
            }
        }
    }

    // Existing aliases must survive unchanged
    for (field, alias) in &existing.aliases {
        match desired.aliases.get(field) {
            None => {
                conflicts.push(SchemaConflict::alias(entity, field, ConflictReason::Removed));
            }
            Some(d) if d != alias => {
                conflicts.push(SchemaConflict::alias(
                    entity,
                    field,
                    ConflictReason::Redefined,
                ));
            }
            Some(_) => {}
        }
    }

    // Existing indexes must survive with the same definition
    for index in &existing.indexes {
        match desired.find_index(&index.name) {
            None => {
                conflicts.push(SchemaConflict::index(
                    entity,
                    &index.name,
                    ConflictReason::Removed,
                ));
            }
            Some(d) if d != index => {
                conflicts.push(SchemaConflict::index(
                    entity,
                    &index.name,
                    ConflictReason::Redefined,
                ));
            }
            Some(_) => {}
        }
    }

    if !conflicts.is_empty() {
        debug!(
            component = "diff_engine",
            entity,
            conflicts_len = conflicts.len(),
            "entity diff conflicted"
        );
        return EntityDiff::Conflicted { conflicts };
    }

    let added_fields: Vec<QueryField> = desired
        .fields
        .iter()
        .filter(|f| existing.find_field(&f.name).is_none())
        .cloned()
        .collect();

    let added_indexes: Vec<QueryIndex> = desired
        .indexes
        .iter()
        .filter(|i| existing.find_index(&i.name).is_none())
        .cloned()
        .collect();

    let added_aliases: BTreeMap<String, String> = desired
        .aliases
        .iter()
        .filter(|(field, _)| !existing.aliases.contains_key(*field))
        .map(|(field, alias)| (field.clone(), alias.clone()))
        .collect();

    let mut changes: Vec<EntityChange> = Vec::new();
    if !added_fields.is_empty() {
        changes.push(EntityChange::AddFields {
            fields: added_fields,
        });
    }
    if !added_indexes.is_empty() {
        changes.push(EntityChange::AddIndexes {
            indexes: added_indexes,
        });
    }
    if !added_aliases.is_empty() {
        changes.push(EntityChange::AddAliases {
            aliases: added_aliases,
        });
    }

    if changes.is_empty() {
        // Same attribute sets in a different declaration order
        return EntityDiff::Unchanged;
    }

    debug!(
        component = "diff_engine",
        entity,
        changes_len = changes.len(),
        "entity diff additive"
    );
    EntityDiff::Additive { changes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::StrictCompatibility;
    use crate::diff::model::ConflictAttribute;
    use crate::model::IndexField;

    fn person() -> QueryEntity {
        QueryEntity::new("java.lang.Integer", "Person")
            .with_field("id", "int")
            .with_field("name", "string")
    }

    #[test]
    fn test_identical_descriptors_are_unchanged() {
        let diff = diff_entity(Some(&person()), &person(), &StrictCompatibility);
        assert_eq!(diff, EntityDiff::Unchanged);
    }

    #[test]
    fn test_absent_existing_is_new() {
        let desired = person();
        let diff = diff_entity(None, &desired, &StrictCompatibility);
        assert_eq!(
            diff,
            EntityDiff::New {
                entity: desired.clone()
            }
        );
    }

    #[test]
    fn test_added_field_is_additive() {
        let desired = person().with_field("age", "int");
        let diff = diff_entity(Some(&person()), &desired, &StrictCompatibility);

        let EntityDiff::Additive { changes } = diff else {
            panic!("expected additive diff, got {:?}", diff);
        };
        assert_eq!(
            changes,
            vec![EntityChange::AddFields {
                fields: vec![QueryField::new("age", "int")]
            }]
        );
    }

    #[test]
    fn test_retyped_field_is_conflict() {
        let desired = QueryEntity::new("java.lang.Integer", "Person")
            .with_field("id", "string")
            .with_field("name", "string");
        let diff = diff_entity(Some(&person()), &desired, &StrictCompatibility);

        let EntityDiff::Conflicted { conflicts } = diff else {
            panic!("expected conflicted diff, got {:?}", diff);
        };
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].entity, "Person");
        assert_eq!(conflicts[0].name, "id");
        assert_eq!(
            conflicts[0].reason,
            ConflictReason::TypeMismatch {
                existing: "int".to_string(),
                desired: "string".to_string()
            }
        );
    }

    #[test]
    fn test_removed_field_is_conflict() {
        let desired = QueryEntity::new("java.lang.Integer", "Person").with_field("id", "int");
        let diff = diff_entity(Some(&person()), &desired, &StrictCompatibility);

        let EntityDiff::Conflicted { conflicts } = diff else {
            panic!("expected conflicted diff, got {:?}", diff);
        };
        assert_eq!(conflicts[0].name, "name");
        assert_eq!(conflicts[0].reason, ConflictReason::Removed);
    }

    #[test]
    fn test_conflict_report_is_complete_in_one_pass() {
        // One retyped field AND one removed alias: both must be reported
        let existing = person().with_alias("id", "ID");
        let desired = QueryEntity::new("java.lang.Integer", "Person")
            .with_field("id", "long")
            .with_field("name", "string");
        let diff = diff_entity(Some(&existing), &desired, &StrictCompatibility);

        let EntityDiff::Conflicted { conflicts } = diff else {
            panic!("expected conflicted diff, got {:?}", diff);
        };
        assert_eq!(conflicts.len(), 2);
    }

    #[test]
    fn test_redefined_index_is_conflict() {
        let existing = person().with_index(QueryIndex::sorted(
            "person_name_idx",
            vec![IndexField::asc("name")],
        ));
        let desired = person().with_index(QueryIndex::sorted(
            "person_name_idx",
            vec![IndexField::desc("name")],
        ));
        let diff = diff_entity(Some(&existing), &desired, &StrictCompatibility);

        let EntityDiff::Conflicted { conflicts } = diff else {
            panic!("expected conflicted diff, got {:?}", diff);
        };
        assert_eq!(conflicts[0].attribute, ConflictAttribute::Index);
        assert_eq!(conflicts[0].reason, ConflictReason::Redefined);
    }

    #[test]
    fn test_added_index_and_alias_are_additive_in_order() {
        let desired = person()
            .with_alias("name", "FULL_NAME")
            .with_index(QueryIndex::sorted(
                "person_name_idx",
                vec![IndexField::asc("name")],
            ));
        let diff = diff_entity(Some(&person()), &desired, &StrictCompatibility);

        let EntityDiff::Additive { changes } = diff else {
            panic!("expected additive diff, got {:?}", diff);
        };
        // Indexes before aliases
        assert!(matches!(changes[0], EntityChange::AddIndexes { .. }));
        assert!(matches!(changes[1], EntityChange::AddAliases { .. }));
    }

    #[test]
    fn test_field_reorder_only_is_unchanged() {
        let desired = QueryEntity::new("java.lang.Integer", "Person")
            .with_field("name", "string")
            .with_field("id", "int");
        let diff = diff_entity(Some(&person()), &desired, &StrictCompatibility);
        assert_eq!(diff, EntityDiff::Unchanged);
    }

    #[test]
    fn test_custom_policy_can_widen_compatibility() {
        struct WideningPolicy;
        impl CompatibilityPolicy for WideningPolicy {
            fn is_compatible(&self, existing: &str, desired: &str) -> bool {
                existing == desired || (existing == "int" && desired == "long")
            }
        }

        let desired = QueryEntity::new("java.lang.Integer", "Person")
            .with_field("id", "long")
            .with_field("name", "string");

        // Strict policy conflicts, widening policy does not
        assert!(matches!(
            diff_entity(Some(&person()), &desired, &StrictCompatibility),
            EntityDiff::Conflicted { .. }
        ));
        assert_eq!(
            diff_entity(Some(&person()), &desired, &WideningPolicy),
            EntityDiff::Unchanged
        );
    }

    #[test]
    fn test_not_null_change_is_conflict() {
        let desired = QueryEntity::new("java.lang.Integer", "Person")
            .with_field("id", "int")
            .with_field("name", "string");
        let mut existing = desired.clone();
        existing.fields[0] = QueryField::new("id", "int").not_null();

        let diff = diff_entity(Some(&existing), &desired, &StrictCompatibility);
        let EntityDiff::Conflicted { conflicts } = diff else {
            panic!("expected conflicted diff, got {:?}", diff);
        };
        assert_eq!(conflicts[0].reason, ConflictReason::Redefined);
    }
}
