//! HTTP response data models.
//!
//! This module defines the structure returned to callers of the API client
//! for successful calls: status information, headers, the decoded JSON
//! payload, and the measured round-trip duration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// A response received through the API client.
///
/// Only 2xx responses reach callers as `ApiResponse`; everything else is
/// reported as an error so that failure handling stays in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code (e.g., 200, 201).
    pub status: u16,

    /// HTTP status text (e.g., "OK", "Created").
    pub status_text: String,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Decoded response payload.
    ///
    /// JSON bodies are parsed into a structured value; non-JSON bodies are
    /// carried as a string, and empty bodies as `null`.
    pub data: Value,

    /// Round-trip duration, measured from dispatch to response handling.
    pub duration: Duration,
}

impl ApiResponse {
    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the duration in whole milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response(status: u16) -> ApiResponse {
        ApiResponse {
            status,
            status_text: "OK".to_string(),
            headers: HashMap::new(),
            data: json!({"ok": true}),
            duration: Duration::from_millis(37),
        }
    }

    #[test]
    fn test_is_success() {
        assert!(sample_response(200).is_success());
        assert!(sample_response(204).is_success());
        assert!(!sample_response(301).is_success());
        assert!(!sample_response(404).is_success());
    }

    #[test]
    fn test_content_type_case_insensitive() {
        let mut response = sample_response(200);
        assert_eq!(response.content_type(), None);

        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[test]
    fn test_duration_ms() {
        assert_eq!(sample_response(200).duration_ms(), 37);
    }
}
