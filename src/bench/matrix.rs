//! Dense matrix multiplication workload
//!
//! The textbook i-j-k triple loop with no blocking, transposition or
//! vectorisation, plus the correctness gate, warm-up and the extended
//! multi-run benchmark protocol.

use std::hint::black_box;
use std::time::Instant;
use tracing::{debug, info};
use crate::bench::engine::{emit, BenchmarkEngine};
use crate::models::{MatrixResult, ResultsHistory};
use crate::report::{summary, LineSink};
use crate::util::stats::TimingStats;
use crate::util::units::format_seconds;
use crate::{BenchError, Result};

/// Untimed multiplies performed by the warm-up
pub const WARMUP_ROUNDS: usize = 3;
/// Absolute tolerance of the correctness gate
pub const VERIFY_TOLERANCE: f64 = 1e-10;

/// Row-major dense matrix of reals
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<Vec<f64>>,
    cols: usize,
}

impl Matrix {
    /// Build a matrix from rows; every row must have the same length
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some(pos) = data.iter().position(|row| row.len() != cols) {
            return Err(BenchError::DimensionMismatch(format!(
                "row {} has {} columns, expected {}",
                pos,
                data[pos].len(),
                cols
            )));
        }
        Ok(Self { data, cols })
    }

    pub(crate) fn from_rows_unchecked(data: Vec<Vec<f64>>, cols: usize) -> Self {
        debug_assert!(data.iter().all(|row| row.len() == cols));
        Self { data, cols }
    }

    /// rows x cols matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![vec![0.0; cols]; rows],
            cols,
        }
    }

    /// n x n identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i][i] = 1.0;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the matrix has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.cols == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    /// Element-wise comparison within an absolute tolerance
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.iter().zip(b).all(|(x, y)| (x - y).abs() < tolerance))
    }
}

/// Multiply `a` (r x c) by `b` (c x k), timing only the accumulation loop.
///
/// Returns the r x k product and the elapsed seconds. Fails when either
/// matrix is empty or the inner dimensions differ.
#[allow(clippy::needless_range_loop)]
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<(Matrix, f64)> {
    if a.is_empty() || b.is_empty() || a.cols() != b.rows() {
        return Err(BenchError::DimensionMismatch(format!(
            "cannot multiply {}x{} by {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }

    let rows_a = a.rows();
    let cols_a = a.cols();
    let cols_b = b.cols();
    let lhs = black_box(&a.data);
    let rhs = black_box(&b.data);

    // Allocated outside the timed region
    let mut result = vec![vec![0.0f64; cols_b]; rows_a];

    let start = Instant::now();
    for i in 0..rows_a {
        for j in 0..cols_b {
            for k in 0..cols_a {
                result[i][j] += lhs[i][k] * rhs[k][j];
            }
        }
    }
    let result = black_box(result);
    let elapsed = start.elapsed().as_secs_f64();

    Ok((Matrix::from_rows_unchecked(result, cols_b), elapsed))
}

/// Inputs and expected product checked before any timed work
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationCase {
    pub a: Matrix,
    pub b: Matrix,
    pub expected: Matrix,
}

impl Default for VerificationCase {
    /// The 2x2 worked example [[1,2],[3,4]] x [[5,6],[7,8]] = [[19,22],[43,50]]
    fn default() -> Self {
        Self {
            a: Matrix::from_rows_unchecked(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 2),
            b: Matrix::from_rows_unchecked(vec![vec![5.0, 6.0], vec![7.0, 8.0]], 2),
            expected: Matrix::from_rows_unchecked(vec![vec![19.0, 22.0], vec![43.0, 50.0]], 2),
        }
    }
}

/// Multiply the case's inputs and compare against its expected product.
///
/// Prints `Verification result: PASSED|FAILED` and fails with
/// `VerificationFailed` on a wrong product or when the inputs cannot be
/// multiplied at all.
pub fn verify_case(case: &VerificationCase, out: &mut dyn LineSink) -> Result<()> {
    out.line("")?;
    out.line("Verifying multiplication accuracy...")?;

    let failure = match multiply(&case.a, &case.b) {
        Ok((product, _)) if product.approx_eq(&case.expected, VERIFY_TOLERANCE) => None,
        Ok((product, _)) => Some(format!(
            "expected {:?}, got {:?}",
            case.expected.as_rows(),
            product.as_rows()
        )),
        Err(e) => Some(e.to_string()),
    };

    out.line(&format!(
        "Verification result: {}",
        if failure.is_none() { "PASSED" } else { "FAILED" }
    ))?;

    match failure {
        None => Ok(()),
        Some(reason) => Err(BenchError::VerificationFailed(reason)),
    }
}

impl BenchmarkEngine {
    /// Check `multiply` against the engine's verification case.
    ///
    /// No benchmark numbers are meaningful when this fails.
    pub fn verify_accuracy(&self, out: &mut dyn LineSink) -> Result<()> {
        verify_case(self.verification_case(), out)
    }

    /// Run untimed multiplies on one fixed-size pair to settle caches and clocks
    pub fn warm_up(&mut self, out: &mut dyn LineSink) -> Result<()> {
        out.line("Performing warm-up runs...")?;

        let size = self.warmup_size();
        let a = self.input().matrix(size, size);
        let b = self.input().matrix(size, size);
        for round in 0..WARMUP_ROUNDS {
            let (_, elapsed) = multiply(&a, &b)?;
            debug!(round, size, elapsed, "warm-up multiply discarded");
        }
        Ok(())
    }

    /// Extended matrix benchmark.
    ///
    /// For each size, runs `extended_runs` sub-experiments of `iterations`
    /// multiplies on freshly generated inputs and aggregates every timing
    /// for that size into one [`MatrixResult`], appended to `history`.
    pub fn run_extended_benchmark(
        &mut self,
        sizes: &[usize],
        iterations: usize,
        extended_runs: usize,
        history: &mut ResultsHistory,
        out: &mut dyn LineSink,
    ) -> Result<Vec<MatrixResult>> {
        let per_size = iterations.saturating_mul(extended_runs);
        if per_size < 2 {
            return Err(BenchError::InsufficientSamples(format!(
                "iterations x extended runs must be at least 2, got {} x {}",
                iterations, extended_runs
            )));
        }

        let progress = self.progress_bar((sizes.len() * per_size) as u64, "matrix");
        let mut results = Vec::with_capacity(sizes.len());

        for &size in sizes {
            emit(&progress, out, "")?;
            emit(&progress, out, &format!("Benchmarking {}x{} matrices...", size, size))?;

            let mut samples = Vec::with_capacity(per_size);
            for run in 0..extended_runs {
                emit(&progress, out, &format!("Extended run {}/{}", run + 1, extended_runs))?;

                for iteration in 0..iterations {
                    let a = self.input().matrix(size, size);
                    let b = self.input().matrix(size, size);

                    let (_, elapsed) = multiply(&a, &b)?;
                    samples.push(elapsed);
                    progress.inc(1);

                    emit(
                        &progress,
                        out,
                        &format!(
                            "  Iteration {}/{}: {} seconds",
                            iteration + 1,
                            iterations,
                            format_seconds(elapsed)
                        ),
                    )?;
                }
            }

            let stats = TimingStats::from_samples(&samples)?;
            let result = MatrixResult::from_stats(size, &stats);
            info!(
                size,
                samples = stats.count,
                median = result.median_time,
                score = result.performance_score,
                "matrix size complete"
            );

            for text in summary::matrix_details(&result) {
                emit(&progress, out, &text)?;
            }

            history.push(result.clone());
            results.push(result);
        }

        progress.finish_and_clear();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::input::InputGenerator;

    #[test]
    fn test_worked_example() {
        let case = VerificationCase::default();
        let (product, elapsed) = multiply(&case.a, &case.b).unwrap();
        assert!(product.approx_eq(&case.expected, VERIFY_TOLERANCE));
        assert!(elapsed >= 0.0);
        assert_eq!(product.get(1, 1), Some(50.0));
    }

    #[test]
    fn test_result_shape_for_compatible_inputs() {
        let mut gen = InputGenerator::new(3);
        for (r, c, k) in [(1, 1, 1), (1, 4, 1), (3, 2, 5), (6, 6, 6), (2, 7, 3)] {
            let a = gen.matrix(r, c);
            let b = gen.matrix(c, k);
            let (product, _) = multiply(&a, &b).unwrap();
            assert_eq!(product.rows(), r);
            assert_eq!(product.cols(), k);
        }
    }

    #[test]
    fn test_identity_returns_input() {
        let mut gen = InputGenerator::new(11);
        for (r, c) in [(1, 1), (3, 3), (4, 2), (2, 5)] {
            let a = gen.matrix(r, c);
            let (product, _) = multiply(&a, &Matrix::identity(c)).unwrap();
            assert!(product.approx_eq(&a, 1e-12));
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut gen = InputGenerator::new(5);
        for (r, c, c2, k) in [(2, 3, 2, 2), (1, 1, 2, 1), (4, 4, 3, 4), (3, 2, 3, 2)] {
            let a = gen.matrix(r, c);
            let b = gen.matrix(c2, k);
            assert!(matches!(multiply(&a, &b), Err(BenchError::DimensionMismatch(_))));
        }
    }

    #[test]
    fn test_empty_matrices_fail() {
        let empty = Matrix::from_rows(vec![]).unwrap();
        let no_cols = Matrix::from_rows(vec![vec![], vec![]]).unwrap();
        let one = Matrix::identity(1);

        for (a, b) in [(&empty, &one), (&one, &empty), (&empty, &empty), (&no_cols, &one)] {
            assert!(matches!(multiply(a, b), Err(BenchError::DimensionMismatch(_))));
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let ragged = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(ragged, Err(BenchError::DimensionMismatch(_))));
    }

    #[test]
    fn test_approx_eq_detects_difference() {
        let expected = VerificationCase::default().expected;
        let off = Matrix::from_rows(vec![vec![19.0, 22.0], vec![43.0, 50.0 + 1e-6]]).unwrap();
        assert!(!off.approx_eq(&expected, VERIFY_TOLERANCE));
        assert!(!Matrix::identity(2).approx_eq(&Matrix::identity(3), VERIFY_TOLERANCE));
    }

    #[test]
    fn test_verify_accuracy_reports_pass() {
        let engine = BenchmarkEngine::new(42);
        let mut out: Vec<String> = Vec::new();
        engine.verify_accuracy(&mut out).unwrap();
        assert_eq!(out.last().map(String::as_str), Some("Verification result: PASSED"));
    }

    #[test]
    fn test_verify_case_reports_failure() {
        let case = VerificationCase {
            expected: Matrix::from_rows(vec![vec![19.0, 22.0], vec![43.0, 51.0]]).unwrap(),
            ..VerificationCase::default()
        };
        let mut out: Vec<String> = Vec::new();

        let err = verify_case(&case, &mut out).unwrap_err();
        assert!(matches!(err, BenchError::VerificationFailed(_)));
        assert_eq!(out.last().map(String::as_str), Some("Verification result: FAILED"));
    }

    #[test]
    fn test_verify_case_with_mismatched_shapes() {
        let case = VerificationCase {
            b: Matrix::identity(3),
            ..VerificationCase::default()
        };
        let mut out: Vec<String> = Vec::new();
        assert!(matches!(
            verify_case(&case, &mut out),
            Err(BenchError::VerificationFailed(_))
        ));
        assert_eq!(out.last().map(String::as_str), Some("Verification result: FAILED"));
    }

    #[test]
    fn test_warm_up_records_nothing() {
        let mut engine = BenchmarkEngine::new(42).with_warmup_size(8);
        let mut out: Vec<String> = Vec::new();
        engine.warm_up(&mut out).unwrap();
        assert_eq!(out, vec!["Performing warm-up runs..."]);
    }

    #[test]
    fn test_extended_benchmark_collects_all_samples() {
        let mut engine = BenchmarkEngine::new(42);
        let mut history = ResultsHistory::new();
        let mut out: Vec<String> = Vec::new();

        let results = engine
            .run_extended_benchmark(&[4, 6], 3, 2, &mut history, &mut out)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].size, 4);
        assert_eq!(results[0].total_iterations, 6);
        assert_eq!(results[0].total_operations, 64 * 6);
        assert_eq!(results[1].total_operations, 216 * 6);
        assert!(results[0].min_time <= results[0].median_time);
        assert!(results[0].median_time <= results[0].max_time);
        assert_eq!(history.len(), 2);

        let iteration_lines = out.iter().filter(|l| l.starts_with("  Iteration ")).count();
        assert_eq!(iteration_lines, 12);
        assert!(out.contains(&"Extended run 2/2".to_string()));
        assert!(out.contains(&"Benchmarking 6x6 matrices...".to_string()));
    }

    #[test]
    fn test_extended_benchmark_needs_two_samples() {
        let mut engine = BenchmarkEngine::new(42);
        let mut history = ResultsHistory::new();
        let mut out: Vec<String> = Vec::new();

        let err = engine
            .run_extended_benchmark(&[4], 1, 1, &mut history, &mut out)
            .unwrap_err();
        assert!(matches!(err, BenchError::InsufficientSamples(_)));
        assert!(history.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_extended_benchmark_zero_size_is_dimension_error() {
        let mut engine = BenchmarkEngine::new(42);
        let mut history = ResultsHistory::new();
        let mut out: Vec<String> = Vec::new();

        let err = engine
            .run_extended_benchmark(&[0], 2, 1, &mut history, &mut out)
            .unwrap_err();
        assert!(matches!(err, BenchError::DimensionMismatch(_)));
        assert!(history.is_empty());
    }
}
