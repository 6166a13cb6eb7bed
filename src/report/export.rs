//! JSON run report
//!
//! Machine-readable copy of one run: system info, the effective
//! configuration, every recorded result and the total score.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::config::BenchmarkConfig;
use crate::models::{ResultsHistory, SystemInfo};
use crate::{BenchError, Result};

/// Current report format version
pub const REPORT_VERSION: u32 = 1;

/// Everything recorded by one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub version: u32,
    pub system_info: SystemInfo,
    pub config: BenchmarkConfig,
    pub results: ResultsHistory,
    /// Sum of every recorded performance score
    pub total_score: f64,
    /// Wall-clock duration of the whole run
    pub elapsed_seconds: f64,
}

impl RunReport {
    pub fn new(
        system_info: SystemInfo,
        config: BenchmarkConfig,
        results: ResultsHistory,
        elapsed_seconds: f64,
    ) -> Self {
        let total_score = results.total_score();
        Self {
            version: REPORT_VERSION,
            system_info,
            config,
            results,
            total_score,
            elapsed_seconds,
        }
    }

    /// Write the report as pretty-printed JSON, creating parent directories
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| BenchError::PersistenceError(
                    format!("Failed to create report directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content)
            .map_err(|e| BenchError::PersistenceError(
                format!("Failed to write report file {}: {}", path.display(), e)
            ))?;

        Ok(())
    }

    /// Read a report written by [`RunReport::write_json`]
    pub fn read_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BenchError::PersistenceError(
                format!("Failed to read report file {}: {}", path.display(), e)
            ))?;

        let report: Self = serde_json::from_str(&content)?;
        if report.version > REPORT_VERSION {
            return Err(BenchError::PersistenceError(format!(
                "Unsupported report version {} (newest known: {})",
                report.version, REPORT_VERSION
            )));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FibonacciResult, ResultRecord, SieveResult};
    use tempfile::TempDir;

    fn create_test_report() -> RunReport {
        let mut results = ResultsHistory::new();
        results.push(FibonacciResult::measured(10, 55, 0.5));
        results.push(FibonacciResult::unavailable(80));
        results.push(SieveResult::new(30, 10, 0.25));
        RunReport::new(SystemInfo::detect(), BenchmarkConfig::quick(), results, 1.5)
    }

    #[test]
    fn test_total_score_from_results() {
        let report = create_test_report();
        assert_eq!(report.version, REPORT_VERSION);
        assert_eq!(report.total_score, 6.0);
    }

    #[test]
    fn test_write_and_read_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("run.json");

        let report = create_test_report();
        report.write_json(&path).unwrap();

        let loaded = RunReport::read_json(&path).unwrap();
        assert_eq!(loaded.config, report.config);
        assert_eq!(loaded.results.records(), report.results.records());
        assert_eq!(loaded.total_score, report.total_score);
        assert!(matches!(
            loaded.results.records()[1],
            ResultRecord::Fibonacci(FibonacciResult { value: None, .. })
        ));
    }

    #[test]
    fn test_report_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.json");
        create_test_report().write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["results"][0]["workload"], "fibonacci");
        assert_eq!(value["results"][1]["execution_time"]["status"], "unavailable");
        assert_eq!(value["results"][2]["primes_found"], 10);
    }

    #[test]
    fn test_read_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            RunReport::read_json(&path),
            Err(BenchError::PersistenceError(_))
        ));
        assert!(RunReport::read_json(&temp_dir.path().join("missing.json")).is_err());
    }
}
