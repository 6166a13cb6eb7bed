//! cpubench - CPU microbenchmark harness
//!
//! Times four deliberately naive textbook algorithms (dense matrix
//! multiplication, recursive Fibonacci, bubble sort and a trial-division
//! prime sieve) on seeded synthetic inputs, and reports descriptive
//! statistics to the console and an append-only log file.

use std::fmt;
use std::sync::OnceLock;

use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

pub mod bench;
pub mod config;
pub mod driver;
pub mod models;
pub mod report;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum BenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Matrices cannot be multiplied (empty, or inner dimensions differ)
    DimensionMismatch(String),
    /// Structurally invalid workload input
    InvalidArgument(String),
    /// Not enough timing samples for the requested statistic
    InsufficientSamples(String),
    /// The multiplication correctness gate failed
    VerificationFailed(String),
    /// Report export error
    PersistenceError(String),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::IoError(err) => write!(f, "I/O error: {}", err),
            BenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BenchError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            BenchError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            BenchError::InsufficientSamples(msg) => write!(f, "Insufficient samples: {}", msg),
            BenchError::VerificationFailed(msg) => write!(f, "Verification failed: {}", msg),
            BenchError::PersistenceError(msg) => write!(f, "Report export error: {}", msg),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::IoError(err)
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for BenchError {
    fn from(err: toml::de::Error) -> Self {
        BenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for BenchError {
    fn from(err: toml::ser::Error) -> Self {
        BenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for cpubench operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Error handling utilities
pub mod error {
    use super::BenchError;

    /// Whether an error must stop the whole run rather than one category.
    ///
    /// Invalid workload input only halts the benchmark category it was
    /// passed to; the driver moves on to the next one.
    pub fn is_fatal_for_run(error: &BenchError) -> bool {
        match error {
            BenchError::VerificationFailed(_)
            | BenchError::ConfigError(_)
            | BenchError::IoError(_) => true,
            BenchError::DimensionMismatch(_)
            | BenchError::InvalidArgument(_)
            | BenchError::InsufficientSamples(_)
            | BenchError::PersistenceError(_) => false,
        }
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &BenchError) -> String {
        match error {
            BenchError::VerificationFailed(_) => {
                "Matrix multiplication produced wrong results; no benchmark numbers were recorded."
                    .to_string()
            }
            BenchError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            BenchError::InsufficientSamples(_) => {
                "Matrix benchmark needs iterations x extended runs of at least 2.".to_string()
            }
            BenchError::PersistenceError(_) => {
                "Failed to write the JSON report. Check the path and permissions.".to_string()
            }
            BenchError::IoError(err) => {
                format!("I/O error: {}. Check that the log file location is writable.", err)
            }
            _ => error.to_string(),
        }
    }
}

static TRACING_GUARD: OnceLock<()> = OnceLock::new();

/// Install the stderr diagnostics subscriber once per process.
///
/// Filtered by `RUST_LOG`, defaulting to warnings only so the report on
/// stdout stays clean.
pub fn init_tracing() {
    TRACING_GUARD.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        // A subscriber installed by an embedding program takes precedence
        let _ = tracing_fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

// Common types and constants
pub const APP_NAME: &str = "cpubench";
pub const APP_TITLE: &str = "Rust Performance Benchmark Tool";
pub const CONFIG_FILE: &str = "cpubench.toml";
pub const LOG_FILE: &str = "cpubench_performance_benchmark.log";
pub const DEFAULT_SEED: u64 = 42;
