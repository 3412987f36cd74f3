//! Error types for the intercepted API client.
//!
//! Non-2xx responses and transport failures both surface as [`ApiError`],
//! so callers handle every failure through one type and the error hook can
//! derive its log message from the same source.

use serde_json::Value;
use std::fmt;

/// Errors returned by the intercepted API client.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure: connection refused, DNS, broken stream.
    Network(String),

    /// The request exceeded the configured timeout.
    Timeout,

    /// The request URL could not be parsed or resolved against the base.
    InvalidUrl(String),

    /// The server answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// HTTP status text matching `status`.
        status_text: String,
        /// The resolved request URL.
        url: String,
        /// The decoded error payload, if any.
        data: Value,
    },

    /// The request could not be constructed.
    Build(String),
}

impl ApiError {
    /// Returns the status code for status errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            ApiError::Status {
                status,
                status_text,
                ..
            } => write!(f, "Request failed with status {} {}", status, status_text),
            ApiError::Build(msg) => write!(f, "Request build error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convert reqwest errors to ApiError.
///
/// Maps reqwest's error classification onto our variants so failure
/// handling is consistent throughout the crate.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_builder() {
            ApiError::Build(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Convert URL parsing errors to ApiError.
impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}
