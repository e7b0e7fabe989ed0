//! Fixed-width bordered tables
//!
//! Two table shapes: the verification table (kernel, Standard, Kokkos,
//! Polly, Check) and the per-kernel benchmark statistics block (metric,
//! Kokkos, Polly). Cells are centered within a fixed column width; ANSI
//! escape sequences do not count toward cell width, so colored cells line up
//! with plain ones.

use crate::color::{GREEN, paint};
use polyharness_stats::TimingSummary;

/// Width of every table cell, excluding the surrounding padding spaces
pub const COL_WIDTH: usize = 25;

/// Number of characters `s` occupies on screen (ANSI escapes excluded).
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else if c != '\u{336}' {
            // Combining long stroke overlay renders over the previous glyph
            width += 1;
        }
    }
    width
}

/// Center `s` within `width` columns of visible text.
fn center(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    if visible >= width {
        return s.to_string();
    }
    let total = width - visible;
    let left = total / 2;
    let right = total - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Horizontal rule for a table with `columns` columns.
pub fn rule(columns: usize) -> String {
    let mut line = String::from("+");
    for _ in 0..columns {
        line.push_str(&"-".repeat(COL_WIDTH + 2));
        line.push('+');
    }
    line
}

/// One bordered row with every cell centered.
fn row(cells: &[&str]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(&center(cell, COL_WIDTH));
        line.push_str(" |");
    }
    line
}

/// Header of the verification table for one kernel group.
pub fn verification_title(group: &str) -> String {
    format!(
        "{}\n{}\n{}",
        rule(5),
        row(&[group, "Standard", "Kokkos", "Polly", "Check"]),
        rule(5)
    )
}

/// One verification result row.
///
/// Timing columns are placeholders: verification runs each variant exactly
/// once and only the hash comparison carries meaning.
pub fn verification_row(kernel: &str, check: &str) -> String {
    format!("{}\n{}", row(&[kernel, "-", "-", "-", check]), rule(5))
}

/// Header of the benchmark table for one kernel group.
pub fn benchmark_title(group: &str) -> String {
    format!(
        "{}\n{}\n{}",
        rule(3),
        row(&[group, "Kokkos", "Polly"]),
        rule(3)
    )
}

/// Six-row statistics block comparing the two optimized variants.
pub fn benchmark_block(kernel: &str, kokkos: &TimingSummary, polly: &TimingSummary) -> String {
    let metrics: [(&str, f64, f64); 6] = [
        ("average", kokkos.mean, polly.mean),
        ("median", kokkos.median, polly.median),
        ("standard deviation", kokkos.std_dev, polly.std_dev),
        ("variance", kokkos.variance, polly.variance),
        ("minimum", kokkos.min as f64, polly.min as f64),
        ("max", kokkos.max as f64, polly.max as f64),
    ];

    let mut out = row(&[&paint(GREEN, kernel), "", ""]);
    for (name, k, p) in metrics {
        out.push('\n');
        out.push_str(&row(&[name, &format_thousands(k), &format_thousands(p)]));
    }
    out.push('\n');
    out.push_str(&rule(3));
    out
}

/// Format a value with thousands separators and one decimal place,
/// e.g. `1234567.89` → `"1,234,567.9"`.
pub fn format_thousands(value: f64) -> String {
    let formatted = format!("{value:.1}");
    let (number, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "0"));
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{fraction}")
}
