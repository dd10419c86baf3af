//! policy-compare connector - authenticated access to the workload security API
//!
//! This crate owns all network I/O:
//! - `config`: endpoint selection, base URL, credentials, timeouts
//! - `transport`: the HTTP seam (`Transport` trait, reqwest blocking client)
//! - `classify`: status / transport failure classification into `PcError`
//! - `search`: search request bodies (criteria, page size, sort order)
//! - `connector`: GET/POST/PATCH, cursor pagination and name lookup
//! - `resources`: known collections and their result keys

pub mod classify;
pub mod config;
pub mod connector;
pub mod resources;
pub mod search;
pub mod transport;

pub use config::{ConnectorConfig, Endpoint, Timeouts};
pub use connector::Connector;
pub use resources::Collection;
pub use search::{SearchCriterion, SearchRequest};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportFailure,
};
