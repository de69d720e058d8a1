use thiserror::Error;

/// Result type alias using SchemaError
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Error taxonomy for schema patch application and serialization
///
/// Schema incompatibility is deliberately *not* represented here: conflicts
/// detected during reconciliation are data on the [`SchemaPatch`], surfaced
/// through `has_conflicts()` / `conflicts_message()`, never raised as errors.
/// Errors cover only misuse of the applier and serialization failures.
///
/// [`SchemaPatch`]: crate::patch::SchemaPatch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A conflicted patch was handed to the applier
    ///
    /// A patch with a non-empty conflict report must never be applied in
    /// whole or in part; the applier refuses it before touching the target.
    #[error("Cannot apply conflicted schema patch to cache {cache_name}: {conflicts}")]
    ConflictedPatch {
        cache_name: String,
        conflicts: String,
    },

    /// An additive operation targets an entity absent from the configuration
    #[error("Query entity not found in cache {cache_name}: {entity}")]
    EntityNotFound { cache_name: String, entity: String },

    /// An add-entity operation targets an identity that is already registered
    #[error("Query entity already exists in cache {cache_name}: {entity}")]
    EntityAlreadyExists { cache_name: String, entity: String },

    /// An operation was routed to a configuration for a different cache
    #[error("Operation {operation_id} targets cache {target_cache} but was applied to cache {actual_cache}")]
    CacheMismatch {
        operation_id: String,
        target_cache: String,
        actual_cache: String,
    },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from serde_json::Error to SchemaError
impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Serialization {
            message: err.to_string(),
        }
    }
}
