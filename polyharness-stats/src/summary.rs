//! Summary Statistics
//!
//! The six descriptive statistics reported per kernel/variant: mean, median,
//! sample standard deviation, sample variance, minimum, and maximum.
//! Spread statistics use the n−1 denominator, so at least two samples are
//! required.

use crate::{StatsError, read_samples};
use std::path::Path;

/// Descriptive statistics over one timing-sample series
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSummary {
    /// Arithmetic mean
    pub mean: f64,
    /// Median (midpoint of the two central samples for even counts)
    pub median: f64,
    /// Sample standard deviation (n−1 denominator)
    pub std_dev: f64,
    /// Sample variance (n−1 denominator)
    pub variance: f64,
    /// Smallest sample
    pub min: i64,
    /// Largest sample
    pub max: i64,
}

/// Compute summary statistics over a sample series.
///
/// Fails with [`StatsError::InsufficientSamples`] for fewer than two
/// samples, since the sample variance is undefined there.
pub fn summarize(samples: &[i64]) -> Result<TimingSummary, StatsError> {
    if samples.len() < 2 {
        return Err(StatsError::InsufficientSamples {
            count: samples.len(),
        });
    }

    let n = samples.len();
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n as f64;

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    } else {
        sorted[n / 2] as f64
    };

    let variance = samples
        .iter()
        .map(|&s| (s as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    let std_dev = variance.sqrt();

    Ok(TimingSummary {
        mean,
        median,
        std_dev,
        variance,
        min: sorted[0],
        max: sorted[n - 1],
    })
}

/// Read a timing log and summarize its samples in one step.
pub fn summarize_file(path: &Path) -> Result<TimingSummary, StatsError> {
    let samples = read_samples(path)?;
    summarize(&samples)
}
