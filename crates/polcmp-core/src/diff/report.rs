//! Plain-text renderer for diff reports.

use crate::diff::model::{DiffReport, DiffValue};
use serde_json::Value;

/// Render a [`DiffReport`] as the text report printed by the CLI.
///
/// `left_name` and `right_name` label the two compared documents.
///
/// ```text
/// Identical: false
/// Differences:
/// - Path: b
///   Base Policy: 2
///   Linux Servers: 3
/// ```
pub fn render_report(report: &DiffReport, left_name: &str, right_name: &str) -> String {
    let mut out = format!("Identical: {}\n", report.identical());
    if report.identical() {
        return out;
    }

    out.push_str("Differences:\n");
    for entry in report.differences() {
        let path = if entry.path.is_empty() {
            "/"
        } else {
            entry.path.as_str()
        };
        out.push_str(&format!("- Path: {}\n", path));
        out.push_str(&format!("  {}: {}\n", left_name, render_side(&entry.value1)));
        out.push_str(&format!("  {}: {}\n\n", right_name, render_side(&entry.value2)));
    }
    out
}

fn render_side(side: &DiffValue) -> String {
    match side {
        DiffValue::Value(value) => render_value(value),
        DiffValue::Set(items) => {
            let members: Vec<String> = items.iter().map(render_value).collect();
            format!("{{{}}}", members.join(", "))
        }
    }
}

// Strings print bare; everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
