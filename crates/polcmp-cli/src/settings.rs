//! Connection settings shared by every subcommand
//!
//! Each flag falls back to an environment variable; a `.env` file in the
//! working directory is loaded before parsing.

use clap::{Args, ValueEnum};
use polcmp_connector::config::DEFAULT_REGION;
use polcmp_connector::{ConnectorConfig, Timeouts};
use polcmp_core::errors::Result;

/// Name of the only supported endpoint
const ENDPOINT: &str = "swp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, debug level
    Pretty,
    /// JSON lines, info level
    Json,
}

#[derive(Debug, Args)]
pub struct Settings {
    /// API secret key
    #[arg(long, env = "API_KEY_SWP", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Service region, e.g. us-1 or de-1
    #[arg(long, env = "REGION_SWP", default_value = DEFAULT_REGION, global = true)]
    pub region: String,

    /// Explicit API base URL, replacing the regional one
    #[arg(long, env = "POLCMP_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Connect timeout in seconds
    #[arg(long, default_value_t = 2, global = true)]
    pub connect_timeout: u64,

    /// Overall request deadline in seconds, including the body read
    #[arg(long, default_value_t = 30, global = true)]
    pub read_timeout: u64,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,
}

impl Settings {
    /// Resolve the connector configuration
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: no API key, or an unusable base URL
    pub fn connector_config(&self) -> Result<ConnectorConfig> {
        let api_key = self.api_key.clone().unwrap_or_default();
        let config = ConnectorConfig::for_endpoint(ENDPOINT, &self.region, api_key)?
            .with_timeouts(Timeouts::from_secs(self.connect_timeout, self.read_timeout))
            .with_verify_tls(!self.insecure);

        match &self.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => Ok(config),
        }
    }
}
