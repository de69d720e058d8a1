//! Human-readable rendering of conflict records.
//!
//! Conflicts travel as structured [`SchemaConflict`] records; callers that
//! need a display string (rejection messages, log lines) join them here,
//! at the boundary, so tests and consumers can assert on structure instead
//! of substrings.

use crate::diff::model::{ConflictAttribute, ConflictReason, SchemaConflict};

/// Render one conflict record as a single line
pub fn render_conflict(conflict: &SchemaConflict) -> String {
    let attribute = match conflict.attribute {
        ConflictAttribute::Field => "field",
        ConflictAttribute::Alias => "alias",
        ConflictAttribute::Index => "index",
    };
    let reason = match &conflict.reason {
        ConflictReason::TypeMismatch { existing, desired } => {
            format!("declared type changed (existing {existing}, desired {desired})")
        }
        ConflictReason::Removed => "removed from desired schema".to_string(),
        ConflictReason::Redefined => "definition changed".to_string(),
    };
    format!(
        "{attribute} \"{}\" of entity {}: {reason}",
        conflict.name, conflict.entity
    )
}

/// Render a conflict report as one line per conflict
///
/// Returns an empty string for an empty report, matching the patch
/// invariant that `has_conflicts()` holds iff the message is non-empty.
pub fn render_conflicts(conflicts: &[SchemaConflict]) -> String {
    conflicts
        .iter()
        .map(render_conflict)
        .collect::<Vec<_>>()
        .join("\n")
}
