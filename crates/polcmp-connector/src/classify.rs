//! Response and transport failure classification
//!
//! Every failure the connector returns passes through one of these two
//! functions; callers match on [`PcErrorKind`] to decide recovery.

use crate::transport::{HttpResponse, TransportFailure};
use polcmp_core::errors::{PcError, PcErrorKind};
use serde_json::Value;

/// Classify a response; `None` for 2xx statuses
pub fn classify_response(response: &HttpResponse) -> Option<PcError> {
    if response.is_success() {
        return None;
    }

    let kind = PcErrorKind::from_status(response.status);
    let err = PcError::new(kind).with_status(response.status);
    let err = match kind {
        PcErrorKind::BadRequest => match body_message(&response.body) {
            Some(message) => err.with_message(message),
            None => err,
        },
        PcErrorKind::UnknownStatus => {
            if response.body.trim().is_empty() {
                err.with_message(format!("Unexpected response status {}", response.status))
            } else {
                err.with_message(response.body.clone())
            }
        }
        _ => err,
    };
    Some(err)
}

/// Classify a failure that produced no response
pub fn classify_failure(failure: &TransportFailure) -> PcError {
    match failure {
        TransportFailure::Timeout(detail) => {
            PcError::new(PcErrorKind::Timeout).with_message(format!("Time out: {}", detail))
        }
        TransportFailure::Connect(detail) => PcError::new(PcErrorKind::ConnectionFailed)
            .with_message(format!("Connection error: {}", detail)),
        TransportFailure::Other(detail) => PcError::new(PcErrorKind::TransportError)
            .with_message(format!("Exception request: {}", detail)),
    }
}

/// The `message` field of a JSON error body, if there is one
fn body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
