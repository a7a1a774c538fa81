//! API Error Types
//!
//! Failures of backend calls. Callers treat every variant as
//! "request failed"; the variants exist for logging.

use thiserror::Error;

/// Errors that can occur when calling the backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend could not be reached
    #[error("Backend unavailable")]
    Unavailable,

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest send error
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(e)
        }
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;
