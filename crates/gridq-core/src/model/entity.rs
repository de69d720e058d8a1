use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::index::QueryIndex;

/// One queryable field of an entity
///
/// `type_name` is the declared value type as the cluster's type system
/// spells it (e.g. `java.lang.Integer` for interop deployments or a
/// platform-neutral name); this core never interprets it beyond handing
/// pairs of names to the compatibility policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryField {
    /// Field name, unique within the entity
    pub name: String,

    /// Declared value type name
    pub type_name: String,

    /// Whether the field rejects null values
    #[serde(default)]
    pub not_null: bool,
}

impl QueryField {
    /// Create a nullable field with the given name and declared type
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            not_null: false,
        }
    }

    /// Mark the field as NOT NULL
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }
}

/// Key/value type identity of an entity
///
/// Two descriptors describe the same logical type exactly when their
/// identities are equal; the patch builder matches existing and desired
/// descriptors on this pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityIdentity {
    pub key_type: String,
    pub value_type: String,
}

impl std::fmt::Display for EntityIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key_type, self.value_type)
    }
}

/// Type Descriptor - describes one queryable record type of a cache
///
/// Field declaration order is significant and preserved end-to-end; the
/// diff engine reports additions in this order. Aliases map field names to
/// their SQL-visible names. Equality is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEntity {
    /// Key type name of the cache entries this entity describes
    pub key_type: String,

    /// Value type name; doubles as the entity's display name in conflict reports
    pub value_type: String,

    /// Queryable fields in declaration order
    #[serde(default)]
    pub fields: Vec<QueryField>,

    /// Field name to SQL alias mapping
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Index definitions
    #[serde(default)]
    pub indexes: Vec<QueryIndex>,
}

impl QueryEntity {
    /// Create an entity with no fields, aliases, or indexes
    pub fn new(key_type: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            key_type: key_type.into(),
            value_type: value_type.into(),
            fields: Vec::new(),
            aliases: BTreeMap::new(),
            indexes: Vec::new(),
        }
    }

    /// Append a nullable field (builder style)
    pub fn with_field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields.push(QueryField::new(name, type_name));
        self
    }

    /// Append an alias mapping (builder style)
    pub fn with_alias(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), alias.into());
        self
    }

    /// Append an index definition (builder style)
    pub fn with_index(mut self, index: QueryIndex) -> Self {
        self.indexes.push(index);
        self
    }

    /// Key/value type identity used to match descriptors across schemas
    pub fn identity(&self) -> EntityIdentity {
        EntityIdentity {
            key_type: self.key_type.clone(),
            value_type: self.value_type.clone(),
        }
    }

    /// Entity name used in conflict reports and log events
    pub fn label(&self) -> &str {
        &self.value_type
    }

    /// Look up a field by name
    pub fn find_field(&self, name: &str) -> Option<&QueryField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up an index by name
    pub fn find_index(&self, name: &str) -> Option<&QueryIndex> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Append a field if no field with the same name exists yet
    ///
    /// Used when materializing additive changes into a configuration;
    /// returns true if the field was appended.
    pub(crate) fn add_field(&mut self, field: QueryField) -> bool {
        if self.find_field(&field.name).is_some() {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Append an index if no index with the same name exists yet
    pub(crate) fn add_index(&mut self, index: QueryIndex) -> bool {
        if self.find_index(&index.name).is_some() {
            return false;
        }
        self.indexes.push(index);
        true
    }

    /// Insert an alias if the field has no alias yet
    pub(crate) fn add_alias(&mut self, field: String, alias: String) -> bool {
        if self.aliases.contains_key(&field) {
            return false;
        }
        self.aliases.insert(field, alias);
        true
    }
}
