//! Log viewer presentation state.
//!
//! [`ViewerState`] is a state machine over the log store's contents: it
//! caches the store's entries, refreshes them on a timer while auto-refresh
//! is enabled, and tracks the filter text, sort mode, per-entry expansion,
//! and the transient confirmation toast. It never touches the storage slot
//! directly; all reads and writes go through the store.

use crate::config::get_config;
use crate::models::LogEntry;
use crate::store::LogStore;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// How the viewer orders visible entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// The store's natural order.
    NewestFirst,
    /// Reversed natural order.
    OldestFirst,
    /// Ascending status code; entries without a status sort as 0.
    Status,
}

impl SortMode {
    /// Returns the display label for this sort mode.
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::NewestFirst => "Newest First",
            SortMode::OldestFirst => "Oldest First",
            SortMode::Status => "Status",
        }
    }
}

/// Transient confirmation notice raised by the clear action.
#[derive(Debug)]
struct Toast {
    message: String,
    shown_at: Instant,
}

/// Presentation state for the log viewer.
pub struct ViewerState {
    logs: Vec<LogEntry>,
    auto_refresh: bool,
    filter: String,
    sort_mode: SortMode,
    expanded: HashSet<String>,
    toast: Option<Toast>,
    last_refresh: Option<Instant>,
    refresh_interval: Duration,
    toast_duration: Duration,
}

impl ViewerState {
    /// Creates a viewer over the given store, loading its current
    /// contents immediately. Auto-refresh starts enabled.
    pub fn new(store: &LogStore) -> Self {
        let config = get_config();
        let mut state = Self {
            logs: Vec::new(),
            auto_refresh: true,
            filter: String::new(),
            sort_mode: SortMode::NewestFirst,
            expanded: HashSet::new(),
            toast: None,
            last_refresh: None,
            refresh_interval: Duration::from_millis(config.refresh_interval),
            toast_duration: Duration::from_millis(config.toast_duration),
        };
        state.refresh(store);
        state
    }

    /// Re-reads the store into the local cache.
    ///
    /// Skipped (returns `false`) when the freshly fetched sequence equals
    /// the cached one, so unchanged polls cause no re-render churn.
    pub fn refresh(&mut self, store: &LogStore) -> bool {
        let fresh = store.get_all();
        self.last_refresh = Some(Instant::now());
        if fresh == self.logs {
            return false;
        }
        self.logs = fresh;
        true
    }

    /// Timer tick: expires the toast and, while auto-refresh is enabled,
    /// refreshes the cache once the refresh interval has elapsed.
    pub fn tick(&mut self, store: &LogStore) {
        if let Some(toast) = &self.toast {
            if toast.shown_at.elapsed() >= self.toast_duration {
                self.toast = None;
            }
        }

        if !self.auto_refresh {
            return;
        }
        let due = self
            .last_refresh
            .map_or(true, |at| at.elapsed() >= self.refresh_interval);
        if due {
            self.refresh(store);
        }
    }

    /// Enables or disables timer-driven refresh.
    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
    }

    /// Whether auto-refresh is enabled.
    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Sets the free-text filter.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// The current filter text.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Sets the sort mode.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// The current sort mode.
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Toggles the expanded state of one entry.
    ///
    /// Expansion is keyed by entry id and independent of filter and sort.
    pub fn toggle_expanded(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Whether an entry is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Clears the store and resets local state.
    ///
    /// Raises a confirmation toast that self-dismisses after the
    /// configured delay.
    pub fn clear(&mut self, store: &LogStore) {
        store.clear();
        self.logs.clear();
        self.expanded.clear();
        self.toast = Some(Toast {
            message: "Logs cleared successfully".to_string(),
            shown_at: Instant::now(),
        });
    }

    /// The active toast message, if one is showing.
    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.message.as_str())
    }

    /// All cached entries, newest-first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Number of cached entries before filtering.
    pub fn total_count(&self) -> usize {
        self.logs.len()
    }

    /// Entries after filter and sort, in display order.
    pub fn visible_entries(&self) -> Vec<&LogEntry> {
        let mut entries: Vec<&LogEntry> = self
            .logs
            .iter()
            .filter(|entry| matches_filter(entry, &self.filter))
            .collect();

        match self.sort_mode {
            SortMode::NewestFirst => {}
            SortMode::OldestFirst => entries.reverse(),
            SortMode::Status => entries.sort_by_key(|entry| entry.status.unwrap_or(0)),
        }

        entries
    }
}

/// Case-insensitive substring match across url, method, status (string
/// form), message, and type.
fn matches_filter(entry: &LogEntry, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();

    if entry.url.to_lowercase().contains(&needle) {
        return true;
    }
    if let Some(method) = &entry.method {
        if method.to_lowercase().contains(&needle) {
            return true;
        }
    }
    if let Some(status) = entry.status {
        if status.to_string().contains(filter) {
            return true;
        }
    }
    if let Some(message) = &entry.message {
        if message.to_lowercase().contains(&needle) {
            return true;
        }
    }
    entry.kind.as_str().contains(&needle)
}
