//! policy-compare core - error facility, logging facility and diff engine
//!
//! This crate holds everything that does not touch the network:
//! - The canonical error taxonomy shared by the connector and the CLI
//! - The structured logging facility (init, macros, test capture)
//! - The structural diff engine and its text report renderer

pub mod diff;
pub mod errors;
pub mod logging_facility;

// Re-export commonly used types
pub use diff::{compare, render_report, DiffEntry, DiffReport, DiffValue};
pub use errors::{PcError, PcErrorKind, Result};
