//! Find command
//!
//! Usage: policy-compare find --name <NAME> [--parent-id <ID>]

use clap::Args;
use polcmp_connector::resources::POLICIES;
use polcmp_connector::{Connector, Transport};

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Exact policy name
    #[arg(long)]
    pub name: String,

    /// Restrict the match to children of this policy
    #[arg(long)]
    pub parent_id: Option<u64>,
}

/// Execute find command
pub fn execute<T: Transport>(
    connector: &Connector<T>,
    args: FindArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = connector.find_by_name(
        POLICIES.endpoint,
        POLICIES.result_key,
        &args.name,
        args.parent_id,
    )?;
    println!("{}", id);
    Ok(())
}
