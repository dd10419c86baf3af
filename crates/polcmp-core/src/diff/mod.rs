//! Structural diff engine.
//!
//! Compares two JSON documents and produces a path-addressed [`DiffReport`].
//!
//! ## Entry point
//!
//! ```
//! use polcmp_core::diff::{compare, render_report};
//! use serde_json::json;
//!
//! let report = compare(&json!({"a": 1, "b": 2}), &json!({"a": 1, "b": 3})).unwrap();
//! assert!(!report.identical());
//! let text = render_report(&report, "Base Policy", "Linux Servers");
//! assert!(text.contains("- Path: b"));
//! ```
//!
//! ## Semantics
//!
//! - **Objects**: the left object drives the key set. A key missing on the
//!   right is compared against `null`; right-only keys are not visited.
//! - **Arrays**: compared as unordered sets of scalar values. One entry is
//!   emitted per differing array, carrying the two set differences.
//! - **Everything else**: direct equality, one entry per unequal pair.
//!
//! Entries appear in traversal order (left key order, depth first).

pub mod engine;
pub mod model;
pub mod report;

pub use engine::compare;
pub use model::{DiffEntry, DiffReport, DiffValue};
pub use report::render_report;
