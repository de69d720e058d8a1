use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::{EntityIdentity, QueryEntity};

/// SQL schema name used when a configuration declares none
pub const DEFAULT_SCHEMA_NAME: &str = "PUBLIC";

/// Cache Schema Configuration - all Type Descriptors of one cache
///
/// A patch freezes a deep copy of the configuration it would produce;
/// mutating the caller's configuration after a build never changes a patch
/// already computed.
///
/// `settings` is an opaque bag of cache-level settings this core carries
/// through untouched; unknown keys are preserved so configurations from
/// newer cluster versions survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSchemaConfiguration {
    /// Cache name
    pub name: String,

    /// SQL schema name; `None` means [`DEFAULT_SCHEMA_NAME`]
    #[serde(default)]
    pub sql_schema: Option<String>,

    /// Registered entities in registration order
    #[serde(default)]
    pub query_entities: Vec<QueryEntity>,

    /// Opaque cache-level settings, carried through untouched
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl CacheSchemaConfiguration {
    /// Create an empty configuration for the named cache
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_schema: None,
            query_entities: Vec::new(),
            settings: BTreeMap::new(),
        }
    }

    /// Set the SQL schema name (builder style)
    pub fn with_sql_schema(mut self, schema: impl Into<String>) -> Self {
        self.sql_schema = Some(schema.into());
        self
    }

    /// Register an entity (builder style)
    pub fn with_entity(mut self, entity: QueryEntity) -> Self {
        self.query_entities.push(entity);
        self
    }

    /// Effective SQL schema name
    pub fn schema_name(&self) -> &str {
        self.sql_schema.as_deref().unwrap_or(DEFAULT_SCHEMA_NAME)
    }

    /// Look up an entity by key/value type identity
    pub fn find_entity(&self, identity: &EntityIdentity) -> Option<&QueryEntity> {
        self.query_entities
            .iter()
            .find(|e| e.identity() == *identity)
    }

    /// Look up an entity by identity, mutably
    pub(crate) fn find_entity_mut(&mut self, identity: &EntityIdentity) -> Option<&mut QueryEntity> {
        self.query_entities
            .iter_mut()
            .find(|e| e.identity() == *identity)
    }

    /// True if an entity with this identity is registered
    pub fn contains_entity(&self, identity: &EntityIdentity) -> bool {
        self.find_entity(identity).is_some()
    }
}
