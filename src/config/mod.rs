//! Configuration management module
//!
//! Handles loading, saving, and validation of the benchmark inputs:
//! seed, workload sizes, repetition counts and output locations.

use std::path::{Path, PathBuf};
use std::fs;
use serde::{Deserialize, Serialize};
use crate::{BenchError, Result, APP_NAME, CONFIG_FILE, DEFAULT_SEED, LOG_FILE};

/// Largest matrix dimension accepted by validation
pub const MAX_MATRIX_SIZE: usize = 2000;
/// Largest Fibonacci n accepted by validation (Fib(94) is the first to overflow u64)
pub const MAX_FIBONACCI_N: i64 = 92;
/// Largest bubble sort list accepted by validation
pub const MAX_SORT_SIZE: usize = 200_000;
/// Largest sieve limit accepted by validation
pub const MAX_SIEVE_LIMIT: i64 = 10_000_000;
/// Largest seed accepted by validation; TOML integers are signed 64-bit
pub const MAX_SEED: u64 = i64::MAX as u64;
/// Smallest stack the Fibonacci worker may be given
pub const MIN_STACK_BYTES: usize = 64 * 1024;

/// Benchmark configuration structure containing all driver inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Seed for the input generator
    pub seed: u64,
    /// Square matrix sizes for the multiplication benchmark
    pub matrix_sizes: Vec<usize>,
    /// Iterations per extended run
    pub iterations: usize,
    /// Extended runs per matrix size
    pub extended_runs: usize,
    /// Dimension of the untimed warm-up matrices
    pub warmup_size: usize,
    /// Fibonacci n values, one timed trial each
    pub fibonacci_n_values: Vec<i64>,
    /// Bubble sort list sizes, one timed trial each
    pub sort_sizes: Vec<usize>,
    /// Prime sieve upper limits, one timed trial each
    pub sieve_limits: Vec<i64>,
    /// Baseline recursion depth permitted to the Fibonacci workload
    pub min_recursion_depth: usize,
    /// Upper bound on the Fibonacci worker thread stack
    pub max_stack_bytes: usize,
    /// Append-only console log
    pub log_file: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            matrix_sizes: vec![200],
            iterations: 5,
            extended_runs: 3,
            warmup_size: 50,
            fibonacci_n_values: vec![35],
            sort_sizes: vec![5000],
            sieve_limits: vec![30000],
            min_recursion_depth: 1000,
            max_stack_bytes: 1024 * 1024 * 1024, // 1 GiB
            log_file: PathBuf::from(LOG_FILE),
        }
    }
}

impl BenchmarkConfig {
    /// Create a new benchmark configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Small inputs for smoke runs that finish in well under a second
    pub fn quick() -> Self {
        Self {
            matrix_sizes: vec![20],
            iterations: 2,
            extended_runs: 1,
            warmup_size: 10,
            fibonacci_n_values: vec![15],
            sort_sizes: vec![200],
            sieve_limits: vec![500],
            ..Self::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.seed > MAX_SEED {
            return Err(BenchError::ConfigError(
                format!("Seed too large: {} (max: {})", self.seed, MAX_SEED)
            ));
        }

        for &size in &self.matrix_sizes {
            if size == 0 {
                return Err(BenchError::ConfigError(
                    "Matrix size must be greater than 0".to_string()
                ));
            }
            if size > MAX_MATRIX_SIZE {
                return Err(BenchError::ConfigError(
                    format!("Matrix size too large: {} (max: {})", size, MAX_MATRIX_SIZE)
                ));
            }
        }

        // Sample standard deviation needs at least two timings per size
        if self.iterations.saturating_mul(self.extended_runs) < 2 {
            return Err(BenchError::ConfigError(
                format!("Iterations x extended runs must be at least 2 (got {} x {})",
                    self.iterations, self.extended_runs)
            ));
        }

        if self.warmup_size == 0 || self.warmup_size > MAX_MATRIX_SIZE {
            return Err(BenchError::ConfigError(
                format!("Warm-up size must be between 1 and {}", MAX_MATRIX_SIZE)
            ));
        }

        for &n in &self.fibonacci_n_values {
            if n <= 0 {
                return Err(BenchError::ConfigError(
                    format!("Fibonacci n must be a positive integer (got {})", n)
                ));
            }
            if n > MAX_FIBONACCI_N {
                return Err(BenchError::ConfigError(
                    format!("Fibonacci n too large: {} (max: {})", n, MAX_FIBONACCI_N)
                ));
            }
        }

        if let Some(&size) = self.sort_sizes.iter().find(|&&s| s > MAX_SORT_SIZE) {
            return Err(BenchError::ConfigError(
                format!("Sort size too large: {} (max: {})", size, MAX_SORT_SIZE)
            ));
        }

        if let Some(&limit) = self.sieve_limits.iter().find(|&&l| l > MAX_SIEVE_LIMIT) {
            return Err(BenchError::ConfigError(
                format!("Sieve limit too large: {} (max: {})", limit, MAX_SIEVE_LIMIT)
            ));
        }

        if self.max_stack_bytes < MIN_STACK_BYTES {
            return Err(BenchError::ConfigError(
                format!("Stack budget must be at least {} bytes", MIN_STACK_BYTES)
            ));
        }

        if self.log_file.as_os_str().is_empty() {
            return Err(BenchError::ConfigError(
                "Log file path must not be empty".to_string()
            ));
        }

        Ok(())
    }

    /// Set the input generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the matrix benchmark shape
    pub fn with_matrix(mut self, sizes: Vec<usize>, iterations: usize, extended_runs: usize) -> Self {
        self.matrix_sizes = sizes;
        self.iterations = iterations;
        self.extended_runs = extended_runs;
        self
    }

    /// Set the Fibonacci n values
    pub fn with_fibonacci(mut self, n_values: Vec<i64>) -> Self {
        self.fibonacci_n_values = n_values;
        self
    }

    /// Set the bubble sort list sizes
    pub fn with_sort_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sort_sizes = sizes;
        self
    }

    /// Set the sieve limits
    pub fn with_sieve_limits(mut self, limits: Vec<i64>) -> Self {
        self.sieve_limits = limits;
        self
    }

    /// Set the log file location
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = path;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            // Return default configuration if file doesn't exist
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BenchError::ConfigError(
                format!("Failed to read config file {}: {}", path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| BenchError::ConfigError(
                format!("Failed to parse config file {}: {}", path.display(), e)
            ))?;

        // Validate the loaded configuration
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Validate and write configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Validate before saving
        self.validate()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| BenchError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content)
            .map_err(|e| BenchError::ConfigError(
                format!("Failed to write config file {}: {}", path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/cpubench/cpubench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BenchError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
