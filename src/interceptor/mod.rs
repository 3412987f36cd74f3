//! The HTTP observability interceptor pipeline.
//!
//! Wraps the single shared HTTP client the rest of the application uses for
//! its API calls. Every call flows through three hooks: a request hook that
//! normalizes headers, stamps a per-call start time, and records an
//! in-scope `request` entry; a response hook that records a `response`
//! entry with the measured duration; and an error hook that records an
//! `error` entry and re-raises the failure unchanged. Entries are
//! sanitized and truncated before they reach the store, and each recorded
//! entry is broadcast to the subscriber registry.
//!
//! Every in-scope call produces exactly one `request` entry and exactly
//! one terminal entry (`response` or `error`). Cross-origin calls execute
//! normally but produce no entries.

pub mod error;
pub mod scope;
pub mod subscribers;

pub use error::ApiError;
pub use scope::{is_in_scope, resolve_url};
pub use subscribers::{SubscriberRegistry, Subscription};

use crate::config::get_config;
use crate::models::{ApiRequest, ApiResponse, EntryFields, HttpMethod, LogEntry, LogKind};
use crate::sanitize::{sanitize_headers, truncate_data};
use crate::store::LogStore;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// The shared, intercepted API client.
///
/// All application traffic goes through one instance so the hooks see
/// every call. The client is cheap to share behind an `Arc` and safe to
/// use from concurrent tasks; each call owns its own timing state.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    store: Arc<LogStore>,
    subscribers: SubscriberRegistry,
    max_data_length: usize,
}

impl ApiClient {
    /// Creates a client over the process-wide default log store.
    ///
    /// # Arguments
    ///
    /// * `base_origin` - Origin of the API, e.g. `http://localhost:2100`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` for an unparsable origin or
    /// `ApiError::Build` if the underlying HTTP client cannot be built.
    pub fn new(base_origin: &str) -> Result<Self, ApiError> {
        Self::with_store(base_origin, crate::store::default_store())
    }

    /// Creates a client from the global configuration's base origin.
    pub fn from_config() -> Result<Self, ApiError> {
        Self::new(&get_config().base_origin)
    }

    /// Creates a client over an explicit log store.
    ///
    /// # Arguments
    ///
    /// * `base_origin` - Origin of the API
    /// * `store` - The log store receiving this client's entries
    pub fn with_store(base_origin: &str, store: Arc<LogStore>) -> Result<Self, ApiError> {
        let base = Url::parse(base_origin)?;
        let config = get_config();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout))
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base,
            store,
            subscribers: SubscriberRegistry::new(),
            max_data_length: config.max_data_length,
        })
    }

    /// Returns the configured base origin.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Returns the log store this client records into.
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Registers a callback invoked for every entry this client records.
    ///
    /// # Returns
    ///
    /// A [`Subscription`] disposer; dropping it deregisters the callback.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Issues a GET request.
    pub async fn get(&self, url: &str) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::get(url)).await
    }

    /// Issues a POST request with a JSON body.
    pub async fn post(&self, url: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::post(url, body)).await
    }

    /// Issues a PUT request with a JSON body.
    pub async fn put(&self, url: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::put(url, body)).await
    }

    /// Issues a DELETE request.
    pub async fn delete(&self, url: &str) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::delete(url)).await
    }

    /// Executes a request through the full interceptor pipeline.
    ///
    /// Resolves the URL against the base origin, normalizes JSON headers,
    /// records the in-scope `request` entry, dispatches the call, and
    /// records the terminal `response` or `error` entry. Failures are
    /// always returned to the caller after logging; the interceptor never
    /// swallows them.
    ///
    /// # Arguments
    ///
    /// * `request` - The request to execute
    ///
    /// # Errors
    ///
    /// `ApiError::Status` for non-2xx responses, transport variants for
    /// network failures, `ApiError::InvalidUrl` when resolution fails.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = resolve_url(&self.base, &request.url)?;
        let in_scope = is_in_scope(&self.base, &url);

        let mut headers = request.headers.clone();
        ensure_json_headers(&mut headers, request.has_body());

        // Each call owns its start instant; durations stay correct when
        // calls interleave.
        let started = Instant::now();

        if in_scope {
            self.record(
                LogKind::Request,
                EntryFields {
                    method: Some(request.method.as_str().to_string()),
                    url: url.to_string(),
                    headers: Some(sanitize_headers(&headers)),
                    data: request
                        .body
                        .as_ref()
                        .map(|body| truncate_data(body, self.max_data_length)),
                    ..Default::default()
                },
            );
        }

        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), url.clone());
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return Err(self.fail(in_scope, &url, ApiError::from(err))),
        };

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let mut response_headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                response_headers.insert(name.as_str().to_string(), value_str.to_string());
            }
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return Err(self.fail(in_scope, &url, ApiError::from(err))),
        };
        let data = decode_payload(&bytes);
        let duration = started.elapsed();

        if status.is_success() {
            if in_scope {
                self.record(
                    LogKind::Response,
                    EntryFields {
                        url: url.to_string(),
                        status: Some(status.as_u16()),
                        status_text: Some(status_text.clone()),
                        duration: Some(duration.as_millis() as u64),
                        data: Some(truncate_data(&data, self.max_data_length)),
                        ..Default::default()
                    },
                );
            }

            Ok(ApiResponse {
                status: status.as_u16(),
                status_text,
                headers: response_headers,
                data,
                duration,
            })
        } else {
            let api_err = ApiError::Status {
                status: status.as_u16(),
                status_text: status_text.clone(),
                url: url.to_string(),
                data: data.clone(),
            };

            if in_scope {
                self.record(
                    LogKind::Error,
                    EntryFields {
                        url: url.to_string(),
                        status: Some(status.as_u16()),
                        status_text: Some(status_text),
                        message: Some(api_err.to_string()),
                        data: Some(truncate_data(&data, self.max_data_length)),
                        ..Default::default()
                    },
                );
            }

            Err(api_err)
        }
    }

    /// Error hook for transport failures: records an `error` entry when
    /// in-scope and hands the error back for re-raising.
    fn fail(&self, in_scope: bool, url: &Url, err: ApiError) -> ApiError {
        if in_scope {
            self.record(
                LogKind::Error,
                EntryFields {
                    url: url.to_string(),
                    message: Some(err.to_string()),
                    ..Default::default()
                },
            );
        }
        err
    }

    fn record(&self, kind: LogKind, fields: EntryFields) {
        match self.store.append(kind.as_str(), fields) {
            Ok(entry) => self.subscribers.publish(&entry),
            Err(err) => log::warn!("failed to record {} entry: {}", kind, err),
        }
    }
}

/// Ensures the JSON `Accept` header, and `Content-Type` for requests with
/// a body, without clobbering values the caller already set.
fn ensure_json_headers(headers: &mut HashMap<String, String>, has_body: bool) {
    if !headers.keys().any(|k| k.eq_ignore_ascii_case("accept")) {
        headers.insert("Accept".to_string(), "application/json".to_string());
    }
    if has_body
        && !headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("content-type"))
    {
        headers.insert("Content-Type".to_string(), "application/json".to_string());
    }
}

/// Decodes a response body: JSON when it parses, lossy text otherwise,
/// `null` when empty.
fn decode_payload(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(_) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_json_headers_adds_missing() {
        let mut headers = HashMap::new();
        ensure_json_headers(&mut headers, true);

        assert_eq!(headers.get("Accept").unwrap(), "application/json");
        assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
    }

    #[test]
    fn test_ensure_json_headers_keeps_existing_variants() {
        let mut headers = HashMap::new();
        headers.insert("accept".to_string(), "text/csv".to_string());
        headers.insert("content-type".to_string(), "text/csv".to_string());
        ensure_json_headers(&mut headers, true);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("accept").unwrap(), "text/csv");
        assert_eq!(headers.get("content-type").unwrap(), "text/csv");
    }

    #[test]
    fn test_ensure_json_headers_no_content_type_without_body() {
        let mut headers = HashMap::new();
        ensure_json_headers(&mut headers, false);

        assert!(headers.contains_key("Accept"));
        assert!(!headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_decode_payload_json() {
        let decoded = decode_payload(br#"{"id": 3}"#);
        assert_eq!(decoded, json!({"id": 3}));
    }

    #[test]
    fn test_decode_payload_plain_text() {
        let decoded = decode_payload(b"service unavailable");
        assert_eq!(decoded, json!("service unavailable"));
    }

    #[test]
    fn test_decode_payload_empty() {
        assert_eq!(decode_payload(b""), Value::Null);
    }

    #[test]
    fn test_client_rejects_invalid_base() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
