use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gridq_core_types::OperationId;

use crate::model::{EntityIdentity, QueryEntity, QueryField, QueryIndex};

/// Variant payload of a schema operation
///
/// The family is closed: every consumer that applies operations matches
/// exhaustively, so a new variant is a compile-time event everywhere
/// instead of a silently ignored message. Only additive mutations exist -
/// the diff engine never emits removal or retyping, and this enum gives
/// such operations no representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SchemaOperationKind {
    /// Register one complete new entity
    ///
    /// Used when a type is entirely new to the cache, not when extending
    /// an existing one.
    AddEntity { entity: QueryEntity },

    /// Add fields to an existing entity
    AddFields {
        entity: EntityIdentity,
        fields: Vec<QueryField>,
    },

    /// Add indexes to an existing entity
    AddIndexes {
        entity: EntityIdentity,
        indexes: Vec<QueryIndex>,
    },

    /// Add alias mappings to an existing entity
    AddAliases {
        entity: EntityIdentity,
        aliases: BTreeMap<String, String>,
    },
}

/// One atomic, addressable, idempotent schema mutation
///
/// Two operations with the same `operation_id` are the same logical change
/// and must be applied at most once by any consumer, even under
/// retransmission. No ordering is defined beyond the position in the
/// patch's operation sequence, which consumers must preserve end-to-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaOperation {
    operation_id: OperationId,
    cache_name: String,
    schema_name: String,
    kind: SchemaOperationKind,
}

impl SchemaOperation {
    /// Create an operation with a freshly minted id
    pub fn new(
        cache_name: impl Into<String>,
        schema_name: impl Into<String>,
        kind: SchemaOperationKind,
    ) -> Self {
        Self {
            operation_id: OperationId::new(),
            cache_name: cache_name.into(),
            schema_name: schema_name.into(),
            kind,
        }
    }

    /// Cluster-wide deduplication key
    pub fn operation_id(&self) -> OperationId {
        self.operation_id
    }

    /// Target cache name
    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// Target SQL schema name
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Variant payload
    pub fn kind(&self) -> &SchemaOperationKind {
        &self.kind
    }
}
