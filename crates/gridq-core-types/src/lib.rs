//! GridQ Core Types - Shared value types for the schema reconciliation core
//!
//! This crate provides the small, dependency-light types shared across the
//! GridQ workspace:
//! - Operation and correlation identifiers
//! - Canonical telemetry event names for structured logging

pub mod ids;
pub mod telemetry;

pub use ids::{OperationId, RequestId};
