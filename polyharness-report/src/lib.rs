#![warn(missing_docs)]
//! Polyharness Report Rendering
//!
//! Terminal presentation for verification and benchmark runs:
//! - ANSI color constants (process-wide statics, no runtime state)
//! - in-place progress lines using clear-to-end-of-line escapes
//! - fixed-width bordered tables with thousands-separator formatting
//!
//! Everything here is a presentation concern: nothing in this crate affects
//! pass/fail semantics.

mod color;
mod progress;
mod table;

pub use color::{GREEN, NO_COLOR, RED, YELLOW, paint};
pub use progress::{clear_line, status};
pub use table::{
    COL_WIDTH, benchmark_block, benchmark_title, format_thousands, rule, verification_row,
    verification_title,
};
