/// Result type alias using PcError
pub type Result<T> = std::result::Result<T, PcError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// The first block classifies remote failures (HTTP status or transport). The
/// remaining kinds cover failures raised locally by the connector, the diff
/// engine and configuration. Each kind maps to a stable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcErrorKind {
    // HTTP status
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ValidationFailed,
    ServerError,
    ServiceUnavailable,
    UnknownStatus,

    // Transport
    Timeout,
    ConnectionFailed,
    TransportError,

    // Lookup / response shape
    /// A name search matched more than one resource
    AmbiguousName,
    /// A 2xx response body was not JSON or lacked an expected field
    InvalidResponse,

    // Diff
    /// An array held an object or array element, which set comparison cannot hash
    UnsupportedArrayElement,

    // Configuration (fatal at startup)
    UnknownEndpoint,
    InvalidConfig,
}

impl PcErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            PcErrorKind::BadRequest => "ERR_BAD_REQUEST",
            PcErrorKind::Unauthorized => "ERR_UNAUTHORIZED",
            PcErrorKind::Forbidden => "ERR_FORBIDDEN",
            PcErrorKind::NotFound => "ERR_NOT_FOUND",
            PcErrorKind::ValidationFailed => "ERR_VALIDATION_FAILED",
            PcErrorKind::ServerError => "ERR_SERVER_ERROR",
            PcErrorKind::ServiceUnavailable => "ERR_SERVICE_UNAVAILABLE",
            PcErrorKind::UnknownStatus => "ERR_UNKNOWN_STATUS",
            PcErrorKind::Timeout => "ERR_TIMEOUT",
            PcErrorKind::ConnectionFailed => "ERR_CONNECTION_FAILED",
            PcErrorKind::TransportError => "ERR_TRANSPORT",
            PcErrorKind::AmbiguousName => "ERR_AMBIGUOUS_NAME",
            PcErrorKind::InvalidResponse => "ERR_INVALID_RESPONSE",
            PcErrorKind::UnsupportedArrayElement => "ERR_UNSUPPORTED_ARRAY_ELEMENT",
            PcErrorKind::UnknownEndpoint => "ERR_UNKNOWN_ENDPOINT",
            PcErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
        }
    }

    /// Classify a non-2xx HTTP status code
    ///
    /// Statuses without a dedicated kind fall into `UnknownStatus`.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => PcErrorKind::BadRequest,
            401 => PcErrorKind::Unauthorized,
            403 => PcErrorKind::Forbidden,
            404 => PcErrorKind::NotFound,
            422 => PcErrorKind::ValidationFailed,
            500 => PcErrorKind::ServerError,
            503 => PcErrorKind::ServiceUnavailable,
            _ => PcErrorKind::UnknownStatus,
        }
    }

    /// Fallback message used when no more specific message is attached
    pub fn default_message(&self) -> &'static str {
        match self {
            PcErrorKind::BadRequest => "400 Bad request",
            PcErrorKind::Unauthorized => {
                "401 Unauthorized. The requesting user does not have enough privilege."
            }
            PcErrorKind::Forbidden => {
                "403 Forbidden. The requesting user does not have enough privilege."
            }
            PcErrorKind::NotFound => "404 Not found",
            PcErrorKind::ValidationFailed => "422 Unprocessable entity. Validation error",
            PcErrorKind::ServerError => "500 The server failed to process the request",
            PcErrorKind::ServiceUnavailable => "503 Service unavailable",
            PcErrorKind::UnknownStatus => "Unexpected response status",
            PcErrorKind::Timeout => "Time out",
            PcErrorKind::ConnectionFailed => "Connection error",
            PcErrorKind::TransportError => "Request failed",
            PcErrorKind::AmbiguousName => "More than one resource matched the name",
            PcErrorKind::InvalidResponse => "Response body could not be interpreted",
            PcErrorKind::UnsupportedArrayElement => "unsupported composite array element",
            PcErrorKind::UnknownEndpoint => "Invalid endpoint",
            PcErrorKind::InvalidConfig => "Invalid configuration",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classified kind plus enough context (operation, request path,
/// HTTP status) to explain the failure without re-wrapping it further up.
#[derive(Debug, Clone, PartialEq)]
pub struct PcError {
    kind: PcErrorKind,
    op: Option<String>,
    path: Option<String>,
    status: Option<u16>,
    message: String,
}

impl PcError {
    /// Create a new error with the kind's default message
    pub fn new(kind: PcErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            status: None,
            message: kind.default_message().to_string(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the request path or diff path the error refers to
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add the HTTP status that produced the error
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Replace the message
    ///
    /// An empty message is ignored so that every error keeps a readable text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.trim().is_empty() {
            self.message = message;
        }
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> PcErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the HTTP status, if the error came from a response
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the error message (never empty)
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for PcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for PcError {}

// ========== End Error Facility ==========
