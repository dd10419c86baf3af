//! Sensitive data marker for automatic redaction
//!
//! The API secret key travels inside the connector configuration; wrapping it
//! in [`Sensitive`] keeps it out of `Debug` output and log lines.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use polcmp_core_types::Sensitive;
///
/// let api_key = Sensitive::new("3A7F:secret");
/// assert_eq!(format!("{:?}", api_key), "***REDACTED***");
/// assert_eq!(api_key.expose(), &"3A7F:secret");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    ///
    /// Only call this where the secret must actually leave the process,
    /// e.g. when building request headers.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
