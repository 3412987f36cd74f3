//! HTTP request data models.
//!
//! This module defines the structures describing an outbound API call before
//! it enters the interceptor pipeline: the HTTP method and the request
//! itself (URL, headers, optional JSON body).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// HTTP request method.
///
/// Covers the verbs the API client issues. The string form is always
/// uppercase, which is also how request log entries record it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
}

impl HttpMethod {
    /// Returns the uppercase string representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// # Arguments
    ///
    /// * `s` - A string slice representing the HTTP method, any case
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a recognized method, `None`
    /// otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An outbound API request.
///
/// The URL may be absolute or relative; relative URLs are resolved against
/// the client's configured base origin before dispatch. Bodies are JSON
/// values, matching the API the client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRequest {
    /// HTTP method (GET, POST, PUT, DELETE, ...).
    pub method: HttpMethod,

    /// Target URL, absolute or relative to the client's base origin.
    pub url: String,

    /// Request headers as key-value pairs.
    ///
    /// Header names are case-insensitive but stored as provided. The
    /// interceptor adds JSON `Accept`/`Content-Type` headers when absent.
    pub headers: HashMap<String, String>,

    /// Optional JSON request body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a new request with no headers or body.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `url` - Target URL, absolute or relative
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Creates a GET request for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::GET, url)
    }

    /// Creates a POST request with a JSON body.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(HttpMethod::POST, url);
        request.body = Some(body);
        request
    }

    /// Creates a PUT request with a JSON body.
    pub fn put(url: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(HttpMethod::PUT, url);
        request.body = Some(body);
        request
    }

    /// Creates a DELETE request for the given URL.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::DELETE, url)
    }

    /// Adds a header to the request.
    ///
    /// # Arguments
    ///
    /// * `name` - Header name
    /// * `value` - Header value
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Returns a header value by case-insensitive name lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Checks whether the request carries a body.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}
