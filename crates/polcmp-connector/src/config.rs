//! Connector configuration
//!
//! A [`ConnectorConfig`] is resolved once at startup for a single named
//! endpoint and never changes afterwards.

use polcmp_core::errors::{PcError, PcErrorKind, Result};
use polcmp_core_types::Sensitive;
use reqwest::Url;
use std::str::FromStr;
use std::time::Duration;

/// Region used when none (or an empty one) is configured
pub const DEFAULT_REGION: &str = "us-1";

/// API version marker sent with every request
pub const API_VERSION: &str = "v1";

/// A named remote target system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Workload security (SaaS), endpoint name `swp`
    WorkloadSecurity,
}

impl Endpoint {
    /// The endpoint's configuration name
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::WorkloadSecurity => "swp",
        }
    }

    /// Regional base URL; an empty region falls back to [`DEFAULT_REGION`]
    pub fn base_url_for_region(&self, region: &str) -> String {
        let region = region.trim();
        let region = if region.is_empty() {
            DEFAULT_REGION
        } else {
            region
        };
        match self {
            Endpoint::WorkloadSecurity => {
                format!("https://workload.{}.cloudone.trendmicro.com/api/", region)
            }
        }
    }
}

impl FromStr for Endpoint {
    type Err = PcError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "swp" => Ok(Endpoint::WorkloadSecurity),
            other => Err(PcError::new(PcErrorKind::UnknownEndpoint)
                .with_op("configure")
                .with_message(format!("Invalid endpoint: {}", other))),
        }
    }
}

/// Per-request deadlines; neither is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Limit on establishing the TCP/TLS connection
    pub connect: Duration,
    /// Limit on the whole request, from connecting until the body is read.
    /// Not a per-read idle limit: a slow but steady response still fails
    /// once this elapses.
    pub read: Duration,
}

impl Timeouts {
    pub fn from_secs(connect: u64, read: u64) -> Self {
        Self {
            connect: Duration::from_secs(connect),
            read: Duration::from_secs(read),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::from_secs(2, 30)
    }
}

/// Immutable configuration for one target endpoint
///
/// `Debug` output never contains the API key.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    endpoint: Endpoint,
    base_url: String,
    api_key: Sensitive<String>,
    timeouts: Timeouts,
    verify_tls: bool,
}

impl ConnectorConfig {
    /// Resolve configuration for the endpoint called `name`
    ///
    /// # Errors
    ///
    /// - `UnknownEndpoint`: `name` is not a supported endpoint
    /// - `InvalidConfig`: the API key is empty
    pub fn for_endpoint(name: &str, region: &str, api_key: impl Into<String>) -> Result<Self> {
        let endpoint: Endpoint = name.parse()?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PcError::new(PcErrorKind::InvalidConfig)
                .with_op("configure")
                .with_message(format!("API key for endpoint '{}' is empty", name)));
        }

        Ok(Self {
            endpoint,
            base_url: endpoint.base_url_for_region(region),
            api_key: Sensitive::new(api_key),
            timeouts: Timeouts::default(),
            verify_tls: true,
        })
    }

    /// Point the connector at an explicit base URL instead of the regional one
    ///
    /// A trailing slash is added when missing so that request paths can be
    /// appended directly.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: not an absolute http(s) URL
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            PcError::new(PcErrorKind::InvalidConfig)
                .with_op("configure")
                .with_message(format!("invalid base URL '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PcError::new(PcErrorKind::InvalidConfig)
                .with_op("configure")
                .with_message(format!(
                    "base URL '{}' must use http or https",
                    base_url
                )));
        }

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.base_url = base;
        Ok(self)
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Disable (false) or enable (true) TLS certificate verification
    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// The fixed header set sent with every request
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-type".to_string(), "application/json".to_string()),
            ("api-secret-key".to_string(), self.api_key.expose().clone()),
            ("api-version".to_string(), API_VERSION.to_string()),
        ]
    }
}
