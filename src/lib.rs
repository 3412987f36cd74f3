//! API Inspector
//!
//! An HTTP observability layer for applications talking to a single REST
//! API: every call made through the shared client is captured as a log
//! entry, sanitized, size-bounded, persisted to a rolling store, and
//! browsable in an interactive viewer.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Core data structures for requests, responses, and log
//!   entries
//! - **sanitize**: Pure redaction and truncation utilities applied before
//!   anything is persisted
//! - **store**: The bounded, ordered, persistent log of HTTP events, the
//!   single choke point over the storage slot
//! - **interceptor**: The pipeline wrapping the shared HTTP client, with
//!   request/response/error hooks and a subscriber registry
//! - **viewer**: A polling state machine plus text rendering for browsing
//!   the store with filter, sort, and expand controls
//! - **config**: Settings loading and the global configuration singleton
//!
//! # Pipeline
//!
//! A caller issues a request through [`ApiClient`]. The request hook
//! normalizes JSON headers, stamps the call's start time, and - when the
//! call targets the configured base origin - records a sanitized `request`
//! entry. After the round trip, the response hook records a `response`
//! entry with the measured duration, or the error hook records an `error`
//! entry and re-raises the failure. The viewer polls the store and renders
//! the result.
//!
//! # Usage
//!
//! ```no_run
//! use api_inspector::interceptor::ApiClient;
//! use api_inspector::store::get_all_logs;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), api_inspector::interceptor::ApiError> {
//! let client = ApiClient::new("http://localhost:2100")?;
//!
//! client.get("/doctors").await?;
//! client.post("/plans", json!({"tier": "gold"})).await?;
//!
//! // Two calls produced four entries: request + response each.
//! assert_eq!(get_all_logs().len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! Failures inside the observability layer never propagate into the
//! calling HTTP flow: an unavailable storage medium degrades appends to
//! warned no-ops, and corrupt storage reads as empty.

pub mod config;
pub mod interceptor;
pub mod models;
pub mod sanitize;
pub mod store;
pub mod viewer;

pub use interceptor::{ApiClient, ApiError, Subscription};
pub use models::{ApiRequest, ApiResponse, EntryFields, HttpMethod, LogEntry, LogKind};
pub use store::{clear_logs, get_all_logs, LogStore};
pub use viewer::{SortMode, ViewerState};
