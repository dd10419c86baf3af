//! Compare command
//!
//! Usage: policy-compare compare --policy1 <ID> --policy2 <ID> [--format text|json]

use clap::{Args, ValueEnum};
use polcmp_connector::resources::POLICIES;
use polcmp_connector::{Connector, Transport};
use polcmp_core::{compare, log_op_end, log_op_error, log_op_start, render_report, DiffReport};
use serde_json::{json, Value};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// ID of the first policy
    #[arg(long)]
    pub policy1: u64,

    /// ID of the second policy
    #[arg(long)]
    pub policy2: u64,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute compare command
pub fn execute<T: Transport>(
    connector: &Connector<T>,
    args: CompareArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    log_op_start!("compare", policy1 = args.policy1, policy2 = args.policy2);

    let left = connector.get(&POLICIES.item_path(args.policy1))?;
    let right = connector.get(&POLICIES.item_path(args.policy2))?;
    let report = compare(&left, &right).map_err(|err| {
        log_op_error!(
            "compare",
            &err,
            duration_ms = started.elapsed().as_millis() as u64,
            path = err.path().unwrap_or_default()
        );
        err
    })?;

    let left_name = display_name(&left, "Policy 1");
    let right_name = display_name(&right, "Policy 2");

    match args.format {
        OutputFormat::Text => print!("{}", render_report(&report, left_name, right_name)),
        OutputFormat::Json => {
            let document = json_document(&args, left_name, right_name, &report);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    log_op_end!(
        "compare",
        duration_ms = started.elapsed().as_millis() as u64,
        difference_count = report.differences().len() as u64
    );
    Ok(())
}

/// The policy's `name`, or `fallback` when it has none
fn display_name<'a>(policy: &'a Value, fallback: &'a str) -> &'a str {
    policy
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback)
}

fn json_document(
    args: &CompareArgs,
    left_name: &str,
    right_name: &str,
    report: &DiffReport,
) -> Value {
    json!({
        "policy1": {"id": args.policy1, "name": left_name},
        "policy2": {"id": args.policy2, "name": right_name},
        "report": report,
    })
}
