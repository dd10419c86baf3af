//! HTTP transport seam
//!
//! The connector talks to the network only through [`Transport`]. The
//! production implementation is [`ReqwestTransport`], a blocking reqwest
//! client; tests substitute scripted transports.

use crate::config::{ConnectorConfig, Timeouts};
use polcmp_core::errors::{PcError, PcErrorKind, Result};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// A fully resolved outbound request
pub struct HttpRequest<'a> {
    pub method: HttpMethod,
    pub url: String,
    pub headers: &'a [(String, String)],
    pub body: Option<String>,
}

impl HttpRequest<'_> {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values are omitted: one of them is the API key.
impl fmt::Debug for HttpRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &header_names)
            .field("body", &self.body)
            .finish()
    }
}

/// Status and raw body of a received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A failure before any response was received
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        // A connect timeout reports both flags; deadline wins.
        if err.is_timeout() {
            TransportFailure::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportFailure::Connect(err.to_string())
        } else {
            TransportFailure::Other(err.to_string())
        }
    }
}

/// Sends one request and returns the raw response
pub trait Transport {
    fn send(
        &self,
        request: &HttpRequest<'_>,
    ) -> std::result::Result<HttpResponse, TransportFailure>;
}

/// Blocking reqwest transport with a connect deadline and a whole-request deadline
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// - `InvalidConfig`: the TLS backend could not be initialised
    pub fn new(timeouts: Timeouts, verify_tls: bool) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.read)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| {
                PcError::new(PcErrorKind::InvalidConfig)
                    .with_op("configure")
                    .with_message(format!("failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        Self::new(config.timeouts(), config.verify_tls())
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: &HttpRequest<'_>,
    ) -> std::result::Result<HttpResponse, TransportFailure> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str());
        for (name, value) in request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
