//! Recursive Fibonacci workload
//!
//! Naive double recursion, exponential in n. The benchmarked variant
//! carries its call depth and gives up once it would pass the permitted
//! limit, and it runs on a dedicated thread whose stack is sized for that
//! limit, so deep inputs are recorded as unavailable instead of
//! overflowing the process stack.

use std::hint::black_box;
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};
use crate::bench::engine::BenchmarkEngine;
use crate::models::{FibonacciResult, ResultsHistory};
use crate::report::LineSink;
use crate::util::units::format_seconds;
use crate::{BenchError, Result};

/// Stack reserved for the worker thread regardless of depth
pub const BASE_STACK_BYTES: usize = 32 * 1024;
/// Stack reserved per permitted recursion level
pub const STACK_BYTES_PER_FRAME: usize = 1024;
/// Headroom added on top of n when raising the depth limit
pub const DEPTH_HEADROOM: usize = 10;

/// The recursion went past the permitted depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

/// Recursion depth and stack allowance for the Fibonacci worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionBudget {
    /// Depth always permitted, whatever n is
    pub min_depth: usize,
    /// Largest stack the worker thread may request
    pub max_stack_bytes: usize,
}

impl Default for RecursionBudget {
    fn default() -> Self {
        Self {
            min_depth: 1000,
            max_stack_bytes: 1024 * 1024 * 1024, // 1 GiB
        }
    }
}

impl RecursionBudget {
    /// Depth permitted for computing Fib(n): max(min_depth, n + 10),
    /// lowered to what the stack allowance can hold
    pub fn depth_limit_for(&self, n: i64) -> usize {
        let wanted = usize::try_from(n)
            .unwrap_or(0)
            .saturating_add(DEPTH_HEADROOM)
            .max(self.min_depth);
        let affordable =
            self.max_stack_bytes.saturating_sub(BASE_STACK_BYTES) / STACK_BYTES_PER_FRAME;
        wanted.min(affordable)
    }

    /// Worker stack size for a given depth limit
    pub fn stack_bytes_for(&self, depth_limit: usize) -> usize {
        depth_limit
            .saturating_mul(STACK_BYTES_PER_FRAME)
            .saturating_add(BASE_STACK_BYTES)
            .min(self.max_stack_bytes)
    }
}

/// Fib(n) by naive double recursion, 1-indexed: Fib(1) = Fib(2) = 1.
///
/// Fails with `InvalidArgument` for n <= 0. Values past Fib(93) wrap.
pub fn recursive_fibonacci(n: i64) -> Result<u64> {
    if n <= 0 {
        return Err(BenchError::InvalidArgument(format!(
            "n must be a positive integer, got {}",
            n
        )));
    }
    Ok(fib(n as u64))
}

fn fib(n: u64) -> u64 {
    if n <= 2 {
        return 1;
    }
    fib(n - 1).wrapping_add(fib(n - 2))
}

/// Same recursion as [`recursive_fibonacci`], bounded to `limit` levels
pub fn fibonacci_depth_limited(n: i64, limit: usize) -> Result<std::result::Result<u64, DepthExceeded>> {
    if n <= 0 {
        return Err(BenchError::InvalidArgument(format!(
            "n must be a positive integer, got {}",
            n
        )));
    }
    Ok(fib_bounded(n as u64, 1, limit))
}

fn fib_bounded(n: u64, depth: usize, limit: usize) -> std::result::Result<u64, DepthExceeded> {
    if depth > limit {
        return Err(DepthExceeded { limit });
    }
    if n <= 2 {
        return Ok(1);
    }
    let left = fib_bounded(n - 1, depth + 1, limit)?;
    let right = fib_bounded(n - 2, depth + 1, limit)?;
    Ok(left.wrapping_add(right))
}

/// Why a Fibonacci trial produced no timing
#[derive(Debug)]
enum Unavailable {
    Depth(DepthExceeded),
    Worker(String),
}

impl BenchmarkEngine {
    /// Time one naive Fib(n) per requested n.
    ///
    /// Depth exhaustion is recorded as an unavailable result with score 0
    /// and the loop moves on; only n <= 0 aborts the category.
    pub fn run_fibonacci_benchmark(
        &self,
        n_values: &[i64],
        history: &mut ResultsHistory,
        out: &mut dyn LineSink,
    ) -> Result<Vec<FibonacciResult>> {
        out.line("")?;
        out.line("Starting Fibonacci benchmark...")?;

        let mut results = Vec::with_capacity(n_values.len());
        for &n in n_values {
            out.line("")?;
            out.line(&format!("Calculating Fibonacci number for n={}", n))?;

            if n <= 0 {
                return Err(BenchError::InvalidArgument(format!(
                    "n must be a positive integer, got {}",
                    n
                )));
            }

            let budget = self.recursion_budget();
            let result = match time_fibonacci(n, budget) {
                Ok((value, elapsed)) => {
                    out.line(&format!("  Result: Fib({}) = {}", n, value))?;
                    out.line(&format!("  Time taken: {} seconds", format_seconds(elapsed)))?;
                    debug!(n, elapsed, "fibonacci complete");
                    FibonacciResult::measured(n, value, elapsed)
                }
                Err(Unavailable::Depth(exceeded)) => {
                    out.line(&format!(
                        "  Recursion depth exceeded for n={} (limit {})",
                        n, exceeded.limit
                    ))?;
                    warn!(n, limit = exceeded.limit, "fibonacci recursion depth exceeded");
                    FibonacciResult::unavailable(n)
                }
                Err(Unavailable::Worker(reason)) => {
                    out.line(&format!("  Could not run Fibonacci for n={}: {}", n, reason))?;
                    warn!(n, %reason, "fibonacci worker unavailable");
                    FibonacciResult::unavailable(n)
                }
            };

            history.push(result.clone());
            results.push(result);
        }

        Ok(results)
    }
}

/// Run one bounded Fib(n) on a worker thread sized for the depth limit.
/// Only the recursion itself is timed.
fn time_fibonacci(n: i64, budget: RecursionBudget) -> std::result::Result<(u64, f64), Unavailable> {
    let limit = budget.depth_limit_for(n);
    let stack_size = budget.stack_bytes_for(limit);

    let handle = thread::Builder::new()
        .name(format!("fib-{}", n))
        .stack_size(stack_size)
        .spawn(move || {
            let start = Instant::now();
            let outcome = fibonacci_depth_limited(black_box(n), limit);
            let elapsed = start.elapsed().as_secs_f64();
            outcome.map(|inner| inner.map(|value| (black_box(value), elapsed)))
        })
        .map_err(|e| Unavailable::Worker(format!("failed to spawn worker thread: {}", e)))?;

    match handle.join() {
        Ok(Ok(Ok(timed))) => Ok(timed),
        Ok(Ok(Err(exceeded))) => Err(Unavailable::Depth(exceeded)),
        Ok(Err(e)) => Err(Unavailable::Worker(e.to_string())),
        Err(_) => Err(Unavailable::Worker("worker thread panicked".to_string())),
    }
}
