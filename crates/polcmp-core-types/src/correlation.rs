//! Correlation identifiers for outbound requests
//!
//! Every request the connector sends is tagged with a fresh [`RequestId`] so
//! that the debug line for the request and any error line for its response
//! can be matched up in the logs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single outbound request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new RequestId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
