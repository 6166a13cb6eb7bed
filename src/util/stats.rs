//! Timing statistics and performance scoring
//!
//! Descriptive statistics over timing samples (in seconds) and the uniform
//! reciprocal-time performance score shared by every workload.

use serde::{Deserialize, Serialize};
use crate::{BenchError, Result};

/// Descriptive statistics over a set of timing samples, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingStats {
    /// Number of samples the statistics were computed from
    pub count: usize,
    /// Fastest sample
    pub min: f64,
    /// Slowest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median (mean of the two middle samples for even counts)
    pub median: f64,
    /// Sample standard deviation; `None` with fewer than two samples
    pub std_dev: Option<f64>,
}

impl TimingStats {
    /// Compute statistics from raw samples. Needs at least one sample.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(BenchError::InsufficientSamples(
                "at least one timing sample is required".to_string(),
            ));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let std_dev = if count >= 2 {
            Some(sample_std_dev(&sorted)?)
        } else {
            None
        };

        Ok(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: mean(&sorted),
            median: median_of_sorted(&sorted),
            std_dev,
        })
    }

    /// Coefficient of variation in percent (0 when undefined)
    pub fn coefficient_of_variation(&self) -> f64 {
        coefficient_of_variation(self.std_dev.unwrap_or(0.0), self.mean)
    }
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let len = sorted.len();
    if len == 0 {
        0.0
    } else if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
    } else {
        sorted[len / 2]
    }
}

/// Median of unsorted samples; 0 for an empty slice
pub fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    median_of_sorted(&sorted)
}

/// Sample standard deviation (n - 1 denominator)
///
/// Undefined for fewer than two samples.
pub fn sample_std_dev(samples: &[f64]) -> Result<f64> {
    if samples.len() < 2 {
        return Err(BenchError::InsufficientSamples(format!(
            "standard deviation needs at least 2 samples, got {}",
            samples.len()
        )));
    }

    let avg = mean(samples);
    let variance = samples
        .iter()
        .map(|&s| {
            let diff = s - avg;
            diff * diff
        })
        .sum::<f64>()
        / (samples.len() - 1) as f64;

    Ok(variance.sqrt())
}

/// Reciprocal of a representative time
///
/// `None` marks a workload that produced no usable measurement. Zero,
/// negative and non-finite times score 0 instead of infinity.
pub fn performance_score(representative_time: Option<f64>) -> f64 {
    match representative_time {
        Some(t) if t > 0.0 && t.is_finite() => 1.0 / t,
        _ => 0.0,
    }
}

/// Operations per second for a given mean time; 0 when the time is 0
pub fn operations_per_second(operations: u64, mean_time: f64) -> f64 {
    if mean_time > 0.0 {
        operations as f64 / mean_time
    } else {
        0.0
    }
}

/// Standard deviation relative to the mean, in percent
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> f64 {
    if mean.abs() < f64::EPSILON {
        return 0.0;
    }
    std_dev / mean * 100.0
}
