//! Interactive log viewer.
//!
//! Consumes the log store through its public operations only: a polling
//! state machine with filter/sort/expand controls, and text rendering of
//! the resulting view.

pub mod render;
pub mod state;

pub use render::{
    classify_status, format_clock_time, format_entry_details, format_entry_line, render_viewer,
    StatusClass,
};
pub use state::{SortMode, ViewerState};
