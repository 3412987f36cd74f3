//! Bounded, ordered, persistent log of HTTP events.
//!
//! All access to the storage slot goes through [`LogStore`]: it is the
//! single choke point enforcing the capacity, ordering, and closed-kind
//! invariants. Entries are kept newest-first and the sequence is trimmed to
//! capacity on every write; once the cap is exceeded the oldest entries are
//! silently dropped.
//!
//! Appends are read-modify-write on a shared slot. Two interleaved appends
//! can lose one update; accepted for telemetry data, not corrected.

pub mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

use crate::config::get_config;
use crate::models::{EntryFields, LogEntry, LogKind};
use once_cell::sync::Lazy;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Fixed key of the storage slot holding the log.
pub const LOG_STORAGE_KEY: &str = "http-logs";

/// Default maximum number of entries retained.
pub const DEFAULT_CAPACITY: usize = 100;

/// Errors that can occur during log store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The caller passed a log type outside the closed set.
    ///
    /// This is a programmer error and is raised loudly rather than coerced.
    InvalidLogType(String),

    /// The storage medium failed.
    ///
    /// Only surfaced from backend construction; the write path degrades to
    /// a warned no-op instead.
    Storage(io::Error),

    /// Serializing the entry sequence failed.
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidLogType(kind) => {
                write!(f, "Invalid log type: {}", kind)
            }
            StoreError::Storage(err) => write!(f, "Log storage error: {}", err),
            StoreError::Serialization(err) => {
                write!(f, "Log serialization error: {}", err)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::InvalidLogType(_) => None,
            StoreError::Storage(err) => Some(err),
            StoreError::Serialization(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Storage(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

/// The bounded persistent event log.
///
/// Wraps a [`StorageBackend`] slot and enforces the store invariants on
/// every operation. Shared across the application behind an `Arc`.
pub struct LogStore {
    backend: Box<dyn StorageBackend>,
    key: String,
    capacity: usize,
}

impl LogStore {
    /// Creates a store over the given backend with the configured capacity.
    ///
    /// # Arguments
    ///
    /// * `backend` - The storage slot implementation
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_capacity(backend, get_config().capacity)
    }

    /// Creates a store with an explicit capacity.
    ///
    /// # Arguments
    ///
    /// * `backend` - The storage slot implementation
    /// * `capacity` - Maximum number of entries retained
    pub fn with_capacity(backend: Box<dyn StorageBackend>, capacity: usize) -> Self {
        Self {
            backend,
            key: LOG_STORAGE_KEY.to_string(),
            capacity,
        }
    }

    /// Returns the store's capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a new entry to the log.
    ///
    /// Builds a [`LogEntry`] with a fresh id and the current timestamp,
    /// prepends it to the persisted sequence, and trims the sequence to
    /// capacity. Callers are expected to pre-sanitize headers and payloads.
    ///
    /// A failing storage medium degrades to a warned no-op: observability
    /// must never crash the application it observes. The returned entry is
    /// the value handed to storage, whether or not the write stuck.
    ///
    /// # Arguments
    ///
    /// * `kind` - The entry kind; must name a member of the closed set
    /// * `fields` - Kind-specific fields
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidLogType` if `kind` is not `"request"`,
    /// `"response"`, or `"error"`. The store is unchanged in that case.
    pub fn append(&self, kind: &str, fields: EntryFields) -> Result<LogEntry, StoreError> {
        let kind =
            LogKind::from_str(kind).ok_or_else(|| StoreError::InvalidLogType(kind.to_string()))?;

        let entry = LogEntry::new(kind, fields);

        let mut entries = self.get_all();
        entries.insert(0, entry.clone());
        entries.truncate(self.capacity);

        if let Err(err) = self.persist(&entries) {
            log::warn!("log append degraded to no-op: {}", err);
        }

        Ok(entry)
    }

    /// Returns all persisted entries, newest-first.
    ///
    /// Missing, unreadable, or corrupt storage yields an empty sequence
    /// rather than an error.
    pub fn get_all(&self) -> Vec<LogEntry> {
        match self.backend.read(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("discarding corrupt log storage: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("log storage unreadable: {}", err);
                Vec::new()
            }
        }
    }

    /// Removes all persisted entries.
    ///
    /// Idempotent: clearing an already-empty store is a no-op success.
    pub fn clear(&self) {
        if let Err(err) = self.backend.remove(&self.key) {
            log::warn!("log clear failed: {}", err);
        }
    }

    fn persist(&self, entries: &[LogEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.backend.write(&self.key, &json)?;
        Ok(())
    }
}

/// Process-wide default store, durable when a config directory exists.
///
/// Falls back to in-memory storage when no home directory can be found, so
/// the observability layer keeps working in degraded environments.
static DEFAULT_STORE: Lazy<Arc<LogStore>> = Lazy::new(|| match FileBackend::new() {
    Ok(file_backend) => Arc::new(LogStore::new(Box::new(file_backend))),
    Err(err) => {
        log::warn!("falling back to in-memory log storage: {}", err);
        Arc::new(LogStore::new(Box::new(MemoryBackend::new())))
    }
});

/// Returns a handle to the process-wide default store.
pub fn default_store() -> Arc<LogStore> {
    Arc::clone(&DEFAULT_STORE)
}

/// Returns all entries from the default store, newest-first.
pub fn get_all_logs() -> Vec<LogEntry> {
    default_store().get_all()
}

/// Clears the default store.
pub fn clear_logs() {
    default_store().clear()
}
