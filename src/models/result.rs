//! Benchmark result data models
//!
//! Contains the per-workload result records and the append-only
//! collector that accumulates them over a run.

use serde::{Deserialize, Serialize};
use crate::util::stats::{operations_per_second, performance_score, TimingStats};

/// Matrix multiplication result for one matrix size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixResult {
    /// Square matrix dimension
    pub size: usize,
    /// Fastest iteration, in seconds
    pub min_time: f64,
    /// Slowest iteration, in seconds
    pub max_time: f64,
    /// Mean iteration time, in seconds
    pub mean_time: f64,
    /// Median iteration time, in seconds
    pub median_time: f64,
    /// Sample standard deviation of iteration times, in seconds
    pub std_dev: f64,
    /// Iterations across all extended runs
    pub total_iterations: usize,
    /// Theoretical multiply-add count (size³ per iteration)
    pub total_operations: u64,
    /// size³ divided by the mean time
    pub operations_per_second: f64,
    /// Reciprocal of the median time
    pub performance_score: f64,
}

impl MatrixResult {
    /// Build a result from the concatenated iteration timings for one size.
    ///
    /// Throughput uses the mean time while the score uses the median time,
    /// so numbers stay comparable with earlier logs.
    pub fn from_stats(size: usize, stats: &TimingStats) -> Self {
        let ops_per_iteration = (size as u64).pow(3);
        Self {
            size,
            min_time: stats.min,
            max_time: stats.max,
            mean_time: stats.mean,
            median_time: stats.median,
            std_dev: stats.std_dev.unwrap_or(0.0),
            total_iterations: stats.count,
            total_operations: ops_per_iteration * stats.count as u64,
            operations_per_second: operations_per_second(ops_per_iteration, stats.mean),
            performance_score: if stats.count == 0 {
                0.0
            } else {
                performance_score(Some(stats.median))
            },
        }
    }

    /// Standard deviation relative to the mean, in percent
    pub fn coefficient_of_variation(&self) -> f64 {
        crate::util::stats::coefficient_of_variation(self.std_dev, self.mean_time)
    }
}

/// Outcome of a single timed trial that may not have been able to run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "seconds", rename_all = "snake_case")]
pub enum ExecutionTime {
    /// Elapsed time in seconds
    Measured(f64),
    /// The trial could not run (recursion depth exhausted)
    Unavailable,
}

impl ExecutionTime {
    /// Elapsed seconds, if the trial ran
    pub fn seconds(&self) -> Option<f64> {
        match self {
            ExecutionTime::Measured(secs) => Some(*secs),
            ExecutionTime::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ExecutionTime::Measured(_))
    }
}

/// Recursive Fibonacci result for one n
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciResult {
    pub n: i64,
    pub execution_time: ExecutionTime,
    /// Computed Fib(n), absent when the trial was unavailable
    pub value: Option<u64>,
    pub performance_score: f64,
}

impl FibonacciResult {
    pub fn measured(n: i64, value: u64, seconds: f64) -> Self {
        Self {
            n,
            execution_time: ExecutionTime::Measured(seconds),
            value: Some(value),
            performance_score: performance_score(Some(seconds)),
        }
    }

    pub fn unavailable(n: i64) -> Self {
        Self {
            n,
            execution_time: ExecutionTime::Unavailable,
            value: None,
            performance_score: 0.0,
        }
    }
}

/// Bubble sort result for one list size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortResult {
    pub size: usize,
    pub execution_time: f64,
    pub performance_score: f64,
}

impl SortResult {
    pub fn new(size: usize, execution_time: f64) -> Self {
        Self {
            size,
            execution_time,
            performance_score: performance_score(Some(execution_time)),
        }
    }
}

/// Naive prime sieve result for one limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SieveResult {
    pub limit: i64,
    pub execution_time: f64,
    pub primes_found: usize,
    pub performance_score: f64,
}

impl SieveResult {
    pub fn new(limit: i64, primes_found: usize, execution_time: f64) -> Self {
        Self {
            limit,
            execution_time,
            primes_found,
            performance_score: performance_score(Some(execution_time)),
        }
    }
}

/// One recorded workload result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "workload", rename_all = "snake_case")]
pub enum ResultRecord {
    Matrix(MatrixResult),
    Fibonacci(FibonacciResult),
    Sort(SortResult),
    Sieve(SieveResult),
}

impl ResultRecord {
    /// Performance score of the underlying result
    pub fn performance_score(&self) -> f64 {
        match self {
            ResultRecord::Matrix(r) => r.performance_score,
            ResultRecord::Fibonacci(r) => r.performance_score,
            ResultRecord::Sort(r) => r.performance_score,
            ResultRecord::Sieve(r) => r.performance_score,
        }
    }

    /// Human-readable workload name
    pub fn workload(&self) -> &'static str {
        match self {
            ResultRecord::Matrix(_) => "Matrix Multiplication",
            ResultRecord::Fibonacci(_) => "Recursive Fibonacci",
            ResultRecord::Sort(_) => "Bubble Sort",
            ResultRecord::Sieve(_) => "Prime Number Generation",
        }
    }
}

impl From<MatrixResult> for ResultRecord {
    fn from(result: MatrixResult) -> Self {
        ResultRecord::Matrix(result)
    }
}

impl From<FibonacciResult> for ResultRecord {
    fn from(result: FibonacciResult) -> Self {
        ResultRecord::Fibonacci(result)
    }
}

impl From<SortResult> for ResultRecord {
    fn from(result: SortResult) -> Self {
        ResultRecord::Sort(result)
    }
}

impl From<SieveResult> for ResultRecord {
    fn from(result: SieveResult) -> Self {
        ResultRecord::Sieve(result)
    }
}

/// Append-only, ordered collection of every result recorded in a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsHistory {
    records: Vec<ResultRecord>,
}

impl ResultsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; records are never modified afterwards
    pub fn push(&mut self, record: impl Into<ResultRecord>) {
        self.records.push(record.into());
    }

    /// All records in execution order
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Summary evaluation: sum of every recorded performance score.
    ///
    /// Folds from +0.0 so an empty history totals 0, not -0.
    pub fn total_score(&self) -> f64 {
        self.records
            .iter()
            .map(ResultRecord::performance_score)
            .fold(0.0, |total, score| total + score)
    }

    pub fn matrix(&self) -> impl Iterator<Item = &MatrixResult> {
        self.records.iter().filter_map(|r| match r {
            ResultRecord::Matrix(m) => Some(m),
            _ => None,
        })
    }

    pub fn fibonacci(&self) -> impl Iterator<Item = &FibonacciResult> {
        self.records.iter().filter_map(|r| match r {
            ResultRecord::Fibonacci(f) => Some(f),
            _ => None,
        })
    }

    pub fn sort(&self) -> impl Iterator<Item = &SortResult> {
        self.records.iter().filter_map(|r| match r {
            ResultRecord::Sort(s) => Some(s),
            _ => None,
        })
    }

    pub fn sieve(&self) -> impl Iterator<Item = &SieveResult> {
        self.records.iter().filter_map(|r| match r {
            ResultRecord::Sieve(s) => Some(s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_stats() -> TimingStats {
        TimingStats::from_samples(&[0.4, 0.5, 0.6, 0.5]).unwrap()
    }

    #[test]
    fn test_matrix_result_from_stats() {
        let result = MatrixResult::from_stats(10, &create_test_stats());

        assert_eq!(result.size, 10);
        assert_eq!(result.total_iterations, 4);
        assert_eq!(result.total_operations, 4000);
        assert_eq!(result.min_time, 0.4);
        assert_eq!(result.max_time, 0.6);
        assert_eq!(result.median_time, 0.5);
        assert!((result.performance_score - 2.0).abs() < 1e-12);
        // 1000 operations per iteration over a mean of 0.5s
        assert!((result.operations_per_second - 2000.0).abs() < 1e-6);
        assert!(result.std_dev > 0.0);
    }

    #[test]
    fn test_matrix_result_zero_times() {
        let stats = TimingStats::from_samples(&[0.0, 0.0]).unwrap();
        let result = MatrixResult::from_stats(3, &stats);
        assert_eq!(result.operations_per_second, 0.0);
        assert_eq!(result.performance_score, 0.0);
        assert_eq!(result.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_fibonacci_result_variants() {
        let measured = FibonacciResult::measured(10, 55, 0.25);
        assert_eq!(measured.execution_time.seconds(), Some(0.25));
        assert_eq!(measured.performance_score, 4.0);
        assert_eq!(measured.value, Some(55));

        let unavailable = FibonacciResult::unavailable(10_000);
        assert!(!unavailable.execution_time.is_available());
        assert_eq!(unavailable.execution_time.seconds(), None);
        assert_eq!(unavailable.performance_score, 0.0);
        assert_eq!(unavailable.value, None);
    }

    #[test]
    fn test_zero_time_scores_zero() {
        assert_eq!(SortResult::new(0, 0.0).performance_score, 0.0);
        assert_eq!(SieveResult::new(1, 0, 0.0).performance_score, 0.0);
        assert_eq!(FibonacciResult::measured(1, 1, 0.0).performance_score, 0.0);
    }

    #[test]
    fn test_results_history_preserves_order_and_sums_scores() {
        let mut history = ResultsHistory::new();
        assert!(history.is_empty());

        history.push(MatrixResult::from_stats(10, &create_test_stats()));
        history.push(FibonacciResult::measured(10, 55, 0.5));
        history.push(FibonacciResult::unavailable(20));
        history.push(SortResult::new(100, 0.25));
        history.push(SieveResult::new(30, 10, 1.0));

        assert_eq!(history.len(), 5);
        let names: Vec<_> = history.records().iter().map(|r| r.workload()).collect();
        assert_eq!(
            names,
            vec![
                "Matrix Multiplication",
                "Recursive Fibonacci",
                "Recursive Fibonacci",
                "Bubble Sort",
                "Prime Number Generation",
            ]
        );

        // 2 + 2 + 0 + 4 + 1
        assert!((history.total_score() - 9.0).abs() < 1e-9);
        assert_eq!(history.matrix().count(), 1);
        assert_eq!(history.fibonacci().count(), 2);
        assert_eq!(history.sort().count(), 1);
        assert_eq!(history.sieve().count(), 1);
    }

    #[test]
    fn test_empty_history_total_is_positive_zero() {
        let history = ResultsHistory::new();
        assert_eq!(history.total_score(), 0.0);
        assert!(history.total_score().is_sign_positive());

        let mut unavailable_only = ResultsHistory::new();
        unavailable_only.push(FibonacciResult::unavailable(50));
        assert!(unavailable_only.total_score().is_sign_positive());
    }

    #[test]
    fn test_record_serialization_tags() {
        let record: ResultRecord = FibonacciResult::unavailable(7).into();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["workload"], "fibonacci");
        assert_eq!(json["execution_time"]["status"], "unavailable");

        let record: ResultRecord = SieveResult::new(30, 10, 0.5).into();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["workload"], "sieve");
        assert_eq!(json["primes_found"], 10);
    }
}
