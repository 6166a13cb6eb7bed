//! Utility functions module
//! 
//! Contains timing statistics, performance scoring and the number
//! formatting used by the report.

pub mod stats;
pub mod units;

// Re-export commonly used functions
pub use stats::{
    coefficient_of_variation, operations_per_second, performance_score,
    sample_std_dev, TimingStats,
};
pub use units::{format_duration, format_grouped, format_seconds};
