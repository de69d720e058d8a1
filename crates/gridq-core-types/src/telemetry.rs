//! Canonical names for structured log events
//!
//! Emitters mark the boundaries of a reconciliation pass with these event
//! names so log pipelines can pair start and end records.

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
    }
}
