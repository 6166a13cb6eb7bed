//! Bubble sort workload

use std::hint::black_box;
use std::time::Instant;
use tracing::debug;
use crate::bench::engine::BenchmarkEngine;
use crate::models::{ResultsHistory, SortResult};
use crate::report::LineSink;
use crate::util::units::format_seconds;
use crate::Result;

/// Sort a copy of `values` with canonical bubble sort.
///
/// Every pass runs to its bound with no early exit, so the comparison
/// count is n(n-1)/2 regardless of the input order. Returns the sorted
/// copy and the elapsed seconds of the sort alone.
pub fn bubble_sort(values: &[i64]) -> (Vec<i64>, f64) {
    let mut sorted = values.to_vec();
    let n = sorted.len();

    let start = Instant::now();
    for pass in 0..n {
        for j in 0..n - pass - 1 {
            if sorted[j] > sorted[j + 1] {
                sorted.swap(j, j + 1);
            }
        }
    }
    let elapsed = start.elapsed().as_secs_f64();

    (black_box(sorted), elapsed)
}

impl BenchmarkEngine {
    /// Sort one freshly generated list per size and record its timing
    pub fn run_sort_benchmark(
        &mut self,
        sizes: &[usize],
        history: &mut ResultsHistory,
        out: &mut dyn LineSink,
    ) -> Result<Vec<SortResult>> {
        out.line("")?;
        out.line("Starting Bubble Sort benchmark...")?;

        let mut results = Vec::with_capacity(sizes.len());
        for &size in sizes {
            let values = self.input().integers(size);

            out.line("")?;
            out.line(&format!("Sorting list of size {}", size))?;

            let (_, elapsed) = bubble_sort(&values);
            out.line(&format!("  Time taken: {} seconds", format_seconds(elapsed)))?;
            debug!(size, elapsed, "bubble sort complete");

            let result = SortResult::new(size, elapsed);
            history.push(result.clone());
            results.push(result);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::input::InputGenerator;

    fn is_non_decreasing(values: &[i64]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_sorts_generated_lists() {
        let mut gen = InputGenerator::new(42);
        for size in [1, 2, 17, 300] {
            let input = gen.integers(size);
            let (sorted, elapsed) = bubble_sort(&input);

            assert!(is_non_decreasing(&sorted));
            assert!(elapsed >= 0.0);

            let mut expected = input.clone();
            expected.sort_unstable();
            assert_eq!(sorted, expected, "not a permutation of the input");
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let input = vec![5, -3, 9, 0, 0, -1000, 1000];
        let snapshot = input.clone();
        let (sorted, _) = bubble_sort(&input);
        assert_eq!(input, snapshot);
        assert_eq!(sorted, vec![-1000, -3, 0, 0, 5, 9, 1000]);
    }

    #[test]
    fn test_empty_and_sorted_inputs_unchanged() {
        let (sorted, _) = bubble_sort(&[]);
        assert!(sorted.is_empty());

        let already = vec![-2, -1, 0, 3, 3, 8];
        assert_eq!(bubble_sort(&already).0, already);
    }

    #[test]
    fn test_reverse_input() {
        let input: Vec<i64> = (0..50).rev().collect();
        let (sorted, _) = bubble_sort(&input);
        assert_eq!(sorted, (0..50).collect::<Vec<i64>>());
    }

    #[test]
    fn test_benchmark_records_each_size() {
        let mut engine = BenchmarkEngine::new(42);
        let mut history = ResultsHistory::new();
        let mut out: Vec<String> = Vec::new();

        let results = engine
            .run_sort_benchmark(&[0, 100, 250], &mut history, &mut out)
            .unwrap();

        assert_eq!(results.iter().map(|r| r.size).collect::<Vec<_>>(), vec![0, 100, 250]);
        assert!(results.iter().all(|r| r.execution_time >= 0.0 && r.performance_score >= 0.0));
        assert_eq!(history.sort().count(), 3);
        assert_eq!(out[1], "Starting Bubble Sort benchmark...");
        assert!(out.contains(&"Sorting list of size 250".to_string()));
    }
}
