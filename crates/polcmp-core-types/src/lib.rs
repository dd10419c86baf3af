//! Core types shared across policy-compare facilities
//!
//! This crate provides foundational types used by the error, logging and
//! connector layers:
//!
//! - **Correlation types**: RequestId for tagging outbound API requests
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction of API keys
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;
