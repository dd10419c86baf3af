//! List command
//!
//! Usage: policy-compare list

use polcmp_connector::resources::POLICIES;
use polcmp_connector::{Connector, Transport};
use serde_json::Value;

/// Execute list command
pub fn execute<T: Transport>(connector: &Connector<T>) -> Result<(), Box<dyn std::error::Error>> {
    let policies = connector.list_all(POLICIES.endpoint, POLICIES.result_key)?;
    for (id, policy) in &policies {
        println!("{}\t{}", id, policy.get("name").and_then(Value::as_str).unwrap_or(""));
    }
    Ok(())
}
