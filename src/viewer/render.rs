//! Text rendering for the log viewer.
//!
//! Formats cached entries into the viewer's display: a one-line summary
//! per entry, an expanded detail block, and the surrounding chrome
//! (header, footer, toast). Also provides the status classification used
//! for display styling.

use super::state::ViewerState;
use crate::models::{LogEntry, LogKind};
use chrono::{DateTime, Local, Utc};

/// Maximum number of lines shown for a pretty-printed headers or data
/// block in the expanded view.
const MAX_DETAIL_LINES: usize = 50;

/// Display classification of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx.
    Success,
    /// 3xx.
    Redirect,
    /// 4xx.
    ClientError,
    /// 5xx.
    ServerError,
    /// No status recorded on the entry.
    None,
}

/// Classifies a status code for display styling.
pub fn classify_status(status: Option<u16>) -> StatusClass {
    match status {
        Some(s) if (200..300).contains(&s) => StatusClass::Success,
        Some(s) if (300..400).contains(&s) => StatusClass::Redirect,
        Some(s) if (400..500).contains(&s) => StatusClass::ClientError,
        Some(s) if s >= 500 => StatusClass::ServerError,
        _ => StatusClass::None,
    }
}

/// Formats a timestamp as a local time-of-day, "HH:MM:SS".
pub fn format_clock_time(timestamp: &DateTime<Utc>) -> String {
    let local_time: DateTime<Local> = timestamp.with_timezone(&Local);
    local_time.format("%H:%M:%S").to_string()
}

/// Formats the one-line summary for an entry.
///
/// Layout: time, type, method, status, url. Fields an entry kind does not
/// carry render as "N/A", matching the columnar list view.
pub fn format_entry_line(entry: &LogEntry) -> String {
    let method = entry.method.as_deref().unwrap_or("N/A");
    let status = entry
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "{}  {:<8}  {:<7}  {:<4}  {}",
        format_clock_time(&entry.timestamp),
        entry.kind.as_str(),
        method,
        status,
        entry.url
    )
}

/// Formats the expanded detail block for an entry.
///
/// Shows duration and message, then the headers and payload as
/// pretty-printed JSON capped at [`MAX_DETAIL_LINES`] lines each.
pub fn format_entry_details(entry: &LogEntry) -> String {
    let mut output = String::new();

    match entry.duration {
        Some(ms) => output.push_str(&format!("  Duration: {} ms\n", ms)),
        None => output.push_str("  Duration: N/A\n"),
    }

    if let Some(message) = &entry.message {
        output.push_str(&format!("  Message: {}\n", message));
    }

    if let Some(headers) = &entry.headers {
        output.push_str("  Headers:\n");
        let pretty = serde_json::to_string_pretty(headers)
            .unwrap_or_else(|_| "(unrenderable)".to_string());
        output.push_str(&indent(&cap_lines(&pretty, MAX_DETAIL_LINES), 4));
    }

    if let Some(data) = &entry.data {
        let label = match entry.kind {
            LogKind::Request => "Request Body",
            _ => "Response Data",
        };
        output.push_str(&format!("  {}:\n", label));
        let pretty =
            serde_json::to_string_pretty(data).unwrap_or_else(|_| "(unrenderable)".to_string());
        output.push_str(&indent(&cap_lines(&pretty, MAX_DETAIL_LINES), 4));
    }

    output
}

/// Renders the whole viewer: header, entry list with expansions, footer,
/// and the active toast if any.
pub fn render_viewer(state: &ViewerState) -> String {
    let mut output = String::new();

    output.push_str("API Request Logger\n");
    output.push_str("──────────────────────────────────────────────────\n");

    let visible = state.visible_entries();
    if visible.is_empty() {
        output.push_str("\nNo logs found\nAPI requests to the server will appear here\n\n");
    } else {
        for entry in &visible {
            let marker = if state.is_expanded(&entry.id) {
                "▾"
            } else {
                "▸"
            };
            output.push_str(&format!("{} {}\n", marker, format_entry_line(entry)));
            if state.is_expanded(&entry.id) {
                output.push_str(&format_entry_details(entry));
            }
        }
    }

    output.push_str("──────────────────────────────────────────────────\n");
    output.push_str(&format!(
        "Showing {} of {} logs | Sort: {} | Auto-refresh {}\n",
        visible.len(),
        state.total_count(),
        state.sort_mode().label(),
        if state.auto_refresh() { "on" } else { "off" }
    ));

    if let Some(toast) = state.toast() {
        output.push_str(&format!("[{}]\n", toast));
    }

    output
}

/// Keeps the first `max_lines` lines, appending a truncation notice when
/// lines were dropped.
fn cap_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }
    let mut capped = lines[..max_lines].join("\n");
    capped.push_str("\n... [TRUNCATED]");
    capped
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut output = String::new();
    for line in text.lines() {
        output.push_str(&pad);
        output.push_str(line);
        output.push('\n');
    }
    output
}
