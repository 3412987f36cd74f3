//! Log entry data models.
//!
//! This module defines the unit of persisted observability data: one
//! [`LogEntry`] per captured request, response, or error event, together
//! with the closed set of entry kinds and the id generation scheme.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// The kind of event a log entry records.
///
/// This is a closed set: the store rejects any write whose kind is not one
/// of these three values. Serialized in lowercase (`"request"`,
/// `"response"`, `"error"`) to match the persisted JSON layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// An outbound request, captured before dispatch.
    Request,
    /// A successful response, captured on arrival.
    Response,
    /// A transport failure or rejected response.
    Error,
}

impl LogKind {
    /// Returns the string representation of the log kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Request => "request",
            LogKind::Response => "response",
            LogKind::Error => "error",
        }
    }

    /// Parses a string into a LogKind.
    ///
    /// # Arguments
    ///
    /// * `s` - A string slice naming the kind
    ///
    /// # Returns
    ///
    /// `Some(LogKind)` if the string names a valid kind, `None` otherwise.
    /// Matching is exact: the persisted layout uses lowercase names and the
    /// store treats anything else as a caller bug.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "request" => Some(LogKind::Request),
            "response" => Some(LogKind::Response),
            "error" => Some(LogKind::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single captured HTTP observability event.
///
/// Entries are created exactly once, by the interceptor pipeline at the
/// moment a request is dispatched or a response/error is received, and are
/// never mutated afterwards. Headers are stored post-redaction and payloads
/// post-truncation; the raw values never reach storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier, generated at write time.
    ///
    /// Time-based hex prefix plus a random suffix; collisions within the
    /// bounded store are negligible.
    pub id: String,

    /// Which event this entry records.
    #[serde(rename = "type")]
    pub kind: LogKind,

    /// When the entry was persisted (not when the call started).
    ///
    /// Stored in UTC, serialized as an RFC 3339 string.
    pub timestamp: DateTime<Utc>,

    /// Uppercase HTTP verb; present on request entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// The resolved request URL; present on all entry kinds.
    pub url: String,

    /// Request headers, post-redaction; present on request entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// Request body or response/error payload, post-truncation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// HTTP status code; present on response and some error entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// HTTP status text matching `status`.
    #[serde(rename = "statusText", skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Round-trip duration in milliseconds; present on response entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// Human-readable error summary; present on error entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Kind-specific fields supplied by the caller when appending an entry.
///
/// The store owns id and timestamp generation; everything else arrives
/// through this carrier, pre-sanitized by the interceptor.
#[derive(Debug, Clone, Default)]
pub struct EntryFields {
    /// Uppercase HTTP verb, for request entries.
    pub method: Option<String>,
    /// The resolved request URL.
    pub url: String,
    /// Post-redaction request headers.
    pub headers: Option<HashMap<String, String>>,
    /// Post-truncation payload.
    pub data: Option<Value>,
    /// HTTP status code.
    pub status: Option<u16>,
    /// HTTP status text.
    pub status_text: Option<String>,
    /// Round-trip duration in milliseconds.
    pub duration: Option<u64>,
    /// Human-readable error summary.
    pub message: Option<String>,
}

impl LogEntry {
    /// Creates a new entry with a fresh id and the current timestamp.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which event the entry records
    /// * `fields` - Kind-specific fields from the caller
    ///
    /// # Returns
    ///
    /// A new `LogEntry` ready for persistence.
    pub fn new(kind: LogKind, fields: EntryFields) -> Self {
        Self {
            id: generate_log_id(),
            kind,
            timestamp: Utc::now(),
            method: fields.method,
            url: fields.url,
            headers: fields.headers,
            data: fields.data,
            status: fields.status,
            status_text: fields.status_text,
            duration: fields.duration,
            message: fields.message,
        }
    }
}

/// Generates a unique entry id.
///
/// Millisecond timestamp in hex, followed by a random 32-bit suffix. The
/// prefix keeps ids roughly sortable; the suffix makes collisions between
/// entries written in the same millisecond negligible.
pub fn generate_log_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::random();
    format!("{:x}-{:08x}", millis, suffix)
}
