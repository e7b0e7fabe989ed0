//! In-place progress lines
//!
//! During building and running, the harness overwrites a single status line
//! with carriage-return + clear-to-end-of-line instead of scrolling the
//! terminal. Callers must [`clear_line`] before printing a table row.

use crate::color::{NO_COLOR, YELLOW};
use std::io::Write;

/// Carriage return plus ANSI clear-to-end-of-line
const CLEAR: &str = "\r\x1b[K";

/// Overwrite the current line with a yellow status message (no newline).
pub fn status(message: &str) {
    print!("{CLEAR}{YELLOW}{message}{NO_COLOR}");
    let _ = std::io::stdout().flush();
}

/// Erase the current progress line.
pub fn clear_line() {
    print!("{CLEAR}");
    let _ = std::io::stdout().flush();
}
