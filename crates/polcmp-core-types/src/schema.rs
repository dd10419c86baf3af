//! Canonical schema constants for structured logging
//!
//! Field names here must match the identifiers written in the logging
//! macros; the test capture layer reads events back through them.

// Canonical field keys read back by the test capture layer
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Error fields
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_fields_are_namespaced() {
        for field in [FIELD_ERR_CODE, FIELD_ERR_MESSAGE] {
            assert!(field.starts_with("err."), "{field} should live under err.");
        }
    }
}
