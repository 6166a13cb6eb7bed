//! Naive prime generation workload
//!
//! Trial division against every smaller divisor with no square-root bound
//! and no wheel, which keeps the scan quadratic in the limit.

use std::hint::black_box;
use std::time::Instant;
use tracing::debug;
use crate::bench::engine::BenchmarkEngine;
use crate::models::{ResultsHistory, SieveResult};
use crate::report::LineSink;
use crate::util::units::format_seconds;
use crate::Result;

/// All primes in 2..=limit, ascending, and the elapsed seconds of the scan.
///
/// A limit below 2 yields an empty list.
pub fn naive_primes(limit: i64) -> (Vec<i64>, f64) {
    let start = Instant::now();

    let mut primes = Vec::new();
    for candidate in 2..=black_box(limit) {
        if !(2..candidate).any(|divisor| candidate % divisor == 0) {
            primes.push(candidate);
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    (black_box(primes), elapsed)
}

impl BenchmarkEngine {
    /// Generate primes up to each limit and record the timing
    pub fn run_sieve_benchmark(
        &self,
        limits: &[i64],
        history: &mut ResultsHistory,
        out: &mut dyn LineSink,
    ) -> Result<Vec<SieveResult>> {
        out.line("")?;
        out.line("Starting Prime Number Generation benchmark...")?;

        let mut results = Vec::with_capacity(limits.len());
        for &limit in limits {
            out.line("")?;
            out.line(&format!("Generating primes up to {}", limit))?;

            let (primes, elapsed) = naive_primes(limit);
            out.line(&format!("  Primes found: {}", primes.len()))?;
            out.line(&format!("  Time taken: {} seconds", format_seconds(elapsed)))?;
            debug!(limit, primes = primes.len(), elapsed, "prime scan complete");

            let result = SieveResult::new(limit, primes.len(), elapsed);
            history.push(result.clone());
            results.push(result);
        }

        Ok(results)
    }
}
