//! Entity diff engine
//!
//! Compares one existing Type Descriptor against one desired descriptor for
//! the same logical type and classifies the result: no-op, brand-new type,
//! strict additive extension, or conflict. Schema evolution is monotonic:
//! fields, aliases, and indexes may only be added, never retyped, redefined,
//! or dropped, so anything non-additive is a conflict, reported as
//! structured records and rendered to text only at the boundary.

pub mod engine;
pub mod model;
pub mod render;

pub use engine::diff_entity;
pub use model::{ConflictAttribute, ConflictReason, EntityChange, EntityDiff, SchemaConflict};
pub use render::{render_conflict, render_conflicts};
