//! Field type compatibility seam
//!
//! The cluster's field/type compatibility rule table lives outside this
//! core and is consumed as a pure predicate. The diff engine asks the
//! policy whether a field declared with one type on the existing side may
//! be read as the type declared on the desired side; a `false` answer
//! classifies the field as conflicting.

/// Pure predicate deciding whether two declared field types are compatible
///
/// Implementations must be total and side-effect-free: the diff engine may
/// call them any number of times, in any order, for any pair of declared
/// type names.
pub trait CompatibilityPolicy {
    /// Returns true if a field declared as `existing` may keep serving
    /// queries when the desired schema declares it as `desired`.
    fn is_compatible(&self, existing: &str, desired: &str) -> bool;
}

/// Default policy: declared types are compatible only when identical
///
/// This is the safe baseline for a query engine whose stored data and
/// query plans depend on exact prior declarations. Deployments with a
/// widening rule table plug in their own [`CompatibilityPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictCompatibility;

impl CompatibilityPolicy for StrictCompatibility {
    fn is_compatible(&self, existing: &str, desired: &str) -> bool {
        existing == desired
    }
}
