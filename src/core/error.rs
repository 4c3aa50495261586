//! Error taxonomy for the HTTP client layer.
//!
//! Application code wraps these in `anyhow` at the boundary; the variants
//! exist so callers can tell a dead gateway from a bad payload.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never reached the service (connect/transport failure).
    #[error("Cannot connect to server: {0}")]
    Unreachable(reqwest::Error),

    /// The service answered with a non-2xx status. `message` carries the
    /// upstream error text when the response body provided one.
    #[error("{}", message.clone().unwrap_or_else(|| format!("HTTP error! status: {status}")))]
    Status { status: u16, message: Option<String> },

    /// The response arrived but did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Malformed(String),

    /// Client-side validation rejected the request before any network call.
    #[error("{0}")]
    Validation(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Unreachable(err)
        }
    }
}
