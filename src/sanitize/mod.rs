//! Redaction and truncation utilities.
//!
//! Pure functions that shape data before it is persisted: sensitive header
//! values are replaced with a fixed marker, and oversized payloads are cut
//! down to a bounded length with an explicit truncation suffix. Nothing in
//! this module performs I/O or mutates its inputs.

use serde_json::Value;
use std::collections::HashMap;

/// Header names whose values are redacted before storage.
///
/// Matched case-insensitively against incoming header names. The raw value
/// of any matching header never reaches persisted storage.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "api-key",
    "auth-token",
    "x-auth-token",
    "access-token",
    "x-access-token",
];

/// Placeholder substituted for a sensitive header's real value.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Suffix appended to a payload that was cut short for size reasons.
pub const TRUNCATION_MARKER: &str = "... [TRUNCATED]";

/// Marker stored in place of a payload that could not be serialized.
pub const UNSERIALIZABLE_MARKER: &str = "[UNSERIALIZABLE]";

/// Default ceiling on the serialized length of a persisted payload.
pub const DEFAULT_MAX_DATA_LENGTH: usize = 1000;

/// Returns a copy of `headers` with sensitive values redacted.
///
/// Every header whose name case-insensitively matches an entry in
/// [`SENSITIVE_HEADERS`] has its value replaced with [`REDACTED_VALUE`];
/// all other entries pass through unchanged, keys included. The caller's
/// map is never mutated, so redaction cannot leak into the headers used
/// for the actual network call.
///
/// # Arguments
///
/// * `headers` - Header name to value mapping
///
/// # Returns
///
/// A new mapping safe for persistence.
pub fn sanitize_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let redact = SENSITIVE_HEADERS
                .iter()
                .any(|sensitive| name.eq_ignore_ascii_case(sensitive));
            if redact {
                (name.clone(), REDACTED_VALUE.to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

/// Bounds a payload to `max_length` characters of serialized form.
///
/// Strings longer than `max_length` are cut to their first `max_length`
/// characters with [`TRUNCATION_MARKER`] appended. Structured values
/// (objects and arrays) are serialized; if the serialized form exceeds
/// `max_length` the truncated serialized string is stored instead of the
/// structure, otherwise the original value is returned unchanged so small
/// payloads stay browsable. A value that fails to serialize is replaced by
/// [`UNSERIALIZABLE_MARKER`]. Other primitives pass through unchanged.
///
/// # Arguments
///
/// * `value` - The payload to bound
/// * `max_length` - Maximum character count before truncation
///
/// # Returns
///
/// A value whose serialized size is bounded, distinguishable from genuine
/// data by the marker suffix.
pub fn truncate_data(value: &Value, max_length: usize) -> Value {
    match value {
        Value::String(s) => {
            if s.chars().count() > max_length {
                Value::String(truncate_chars(s, max_length))
            } else {
                value.clone()
            }
        }
        Value::Object(_) | Value::Array(_) => match serde_json::to_string(value) {
            Ok(serialized) => {
                if serialized.chars().count() > max_length {
                    Value::String(truncate_chars(&serialized, max_length))
                } else {
                    value.clone()
                }
            }
            Err(_) => Value::String(UNSERIALIZABLE_MARKER.to_string()),
        },
        _ => value.clone(),
    }
}

/// Cuts `s` to its first `max_length` characters and appends the marker.
fn truncate_chars(s: &str, max_length: usize) -> String {
    let mut truncated: String = s.chars().take(max_length).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn headers_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sanitize_redacts_sensitive_values() {
        let headers = headers_from(&[
            ("Authorization", "Bearer secret-token"),
            ("Content-Type", "application/json"),
        ]);

        let sanitized = sanitize_headers(&headers);
        assert_eq!(sanitized.get("Authorization").unwrap(), REDACTED_VALUE);
        assert_eq!(sanitized.get("Content-Type").unwrap(), "application/json");
    }

    #[test]
    fn test_sanitize_is_case_insensitive() {
        let headers = headers_from(&[
            ("authorization", "a"),
            ("COOKIE", "session=abc"),
            ("X-Api-Key", "k"),
            ("x-auth-token", "t"),
        ]);

        let sanitized = sanitize_headers(&headers);
        for value in sanitized.values() {
            assert_eq!(value, REDACTED_VALUE);
        }
    }

    #[test]
    fn test_sanitize_preserves_keys_and_other_values() {
        let headers = headers_from(&[("Accept", "application/json"), ("Cookie", "id=1")]);

        let sanitized = sanitize_headers(&headers);
        assert_eq!(sanitized.len(), 2);
        assert!(sanitized.contains_key("Accept"));
        assert!(sanitized.contains_key("Cookie"));
        assert_eq!(sanitized.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn test_sanitize_does_not_mutate_input() {
        let headers = headers_from(&[("Authorization", "Bearer secret")]);
        let _ = sanitize_headers(&headers);
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer secret");
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        let value = json!("short");
        assert_eq!(truncate_data(&value, 100), value);
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(150);
        let truncated = truncate_data(&json!(long), 100);

        let s = truncated.as_str().unwrap();
        assert!(s.starts_with(&"a".repeat(100)));
        assert!(s.ends_with(TRUNCATION_MARKER));
        assert_eq!(s.len(), 100 + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_truncate_small_object_keeps_structure() {
        let value = json!({"name": "Dr. Ames", "fee": 250});
        let result = truncate_data(&value, 1000);
        assert!(result.is_object());
        assert_eq!(result, value);
    }

    #[test]
    fn test_truncate_large_object_becomes_string() {
        let value = json!({"blob": "x".repeat(500)});
        let result = truncate_data(&value, 100);

        let s = result.as_str().unwrap();
        assert!(s.starts_with("{\"blob\""));
        assert!(s.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncate_primitives_pass_through() {
        assert_eq!(truncate_data(&json!(42), 5), json!(42));
        assert_eq!(truncate_data(&json!(true), 1), json!(true));
        assert_eq!(truncate_data(&Value::Null, 0), Value::Null);
    }

    #[test]
    fn test_truncate_multibyte_string_respects_char_boundaries() {
        let s = "é".repeat(20);
        let result = truncate_data(&json!(s), 10);

        let out = result.as_str().unwrap();
        assert!(out.starts_with(&"é".repeat(10)));
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    proptest! {
        #[test]
        fn prop_truncated_strings_keep_prefix_and_marker(s in ".{0,300}", max in 1usize..200) {
            let result = truncate_data(&Value::String(s.clone()), max);
            let out = result.as_str().unwrap();
            if s.chars().count() > max {
                let prefix: String = s.chars().take(max).collect();
                prop_assert!(out.starts_with(&prefix));
                prop_assert!(out.ends_with(TRUNCATION_MARKER));
            } else {
                prop_assert_eq!(out, s.as_str());
            }
        }

        #[test]
        fn prop_sanitize_never_leaks_sensitive_values(value in "[a-zA-Z0-9]{1,40}") {
            for name in SENSITIVE_HEADERS {
                let headers = HashMap::from([(name.to_uppercase(), value.clone())]);
                let sanitized = sanitize_headers(&headers);
                for v in sanitized.values() {
                    prop_assert_eq!(v, REDACTED_VALUE);
                }
            }
        }
    }
}
