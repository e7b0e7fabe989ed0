//! ANSI color table
//!
//! Fixed escape sequences matching the palette the kernel harness has always
//! printed with. Colors are applied unconditionally; redirecting output to a
//! file keeps the escapes, same as the rest of the toolchain's logs.

/// Red foreground
pub const RED: &str = "\x1b[0;31m";
/// Green foreground
pub const GREEN: &str = "\x1b[0;32m";
/// Yellow foreground
pub const YELLOW: &str = "\x1b[0;33m";
/// Reset to the terminal default
pub const NO_COLOR: &str = "\x1b[0m";

/// Wrap `text` in a color escape followed by a reset.
pub fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{NO_COLOR}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_and_resets() {
        let s = paint(GREEN, "ok");
        assert!(s.starts_with(GREEN));
        assert!(s.ends_with(NO_COLOR));
        assert!(s.contains("ok"));
    }
}
