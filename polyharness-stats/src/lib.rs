#![warn(missing_docs)]
//! Polyharness Statistical Engine
//!
//! Parses timing-log files (one integer cycle count per line, as emitted by
//! instrumented PolyBench kernels) and computes descriptive summary
//! statistics over them: mean, median, sample standard deviation, sample
//! variance, minimum, and maximum.
//!
//! Malformed input is an error, never silently skipped: an empty file, a
//! non-integer line, or fewer than two samples all abort the run.

mod samples;
mod summary;

pub use samples::read_samples;
pub use summary::{TimingSummary, summarize, summarize_file};

use std::path::PathBuf;

/// Errors produced while reading or summarizing timing samples
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Timing log could not be read
    #[error("failed to read timing log {path}: {source}")]
    Io {
        /// Path of the timing log
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A line of the timing log did not parse as an integer
    #[error("invalid timing sample at {path}:{line}: {content:?}")]
    Parse {
        /// Path of the timing log
        path: PathBuf,
        /// 1-based line number of the offending sample
        line: usize,
        /// The raw line content
        content: String,
    },

    /// The timing log contained no samples
    #[error("timing log {path} is empty")]
    Empty {
        /// Path of the timing log
        path: PathBuf,
    },

    /// Sample standard deviation and variance need at least two points
    #[error("need at least 2 timing samples, got {count}")]
    InsufficientSamples {
        /// Number of samples actually present
        count: usize,
    },
}
