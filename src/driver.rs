//! Benchmark run driver
//!
//! Sequences one complete run: banner, system header, correctness gate,
//! warm-up, the four workload categories, summary and footer. Every line
//! goes to the caller's [`LineSink`].

use std::time::Instant;
use tracing::{error, info, warn};
use crate::bench::BenchmarkEngine;
use crate::config::BenchmarkConfig;
use crate::error::is_fatal_for_run;
use crate::models::{ResultsHistory, SystemInfo};
use crate::report::{summary, LineSink, RunReport};
use crate::util::units::format_duration;
use crate::Result;

/// Run every benchmark category described by `config`.
///
/// A failed correctness gate aborts before any timed work. Invalid input
/// for one category halts that category only; the rest still run.
pub fn run(config: &BenchmarkConfig, show_progress: bool, out: &mut dyn LineSink) -> Result<RunReport> {
    let engine = BenchmarkEngine::from_config(config).with_progress(show_progress);
    run_with_engine(config, engine, out)
}

/// Same as [`run`], with a caller-built engine
pub fn run_with_engine(
    config: &BenchmarkConfig,
    mut engine: BenchmarkEngine,
    out: &mut dyn LineSink,
) -> Result<RunReport> {
    config.validate()?;
    let started = Instant::now();

    out.lines(&summary::banner())?;

    let system_info = SystemInfo::detect();
    out.lines(&summary::system_header(&system_info))?;

    if let Err(e) = engine.verify_accuracy(out) {
        error!(error = %e, "multiplication correctness gate failed");
        out.line("ERROR: Matrix multiplication verification failed!")?;
        return Err(e);
    }

    engine.warm_up(out)?;

    out.line("")?;
    out.line("Starting benchmark...")?;
    info!(seed = config.seed, "benchmark started");

    let mut history = ResultsHistory::new();

    let matrix = engine.run_extended_benchmark(
        &config.matrix_sizes,
        config.iterations,
        config.extended_runs,
        &mut history,
        out,
    );
    settle("Matrix multiplication", matrix, out)?;

    let fibonacci = engine.run_fibonacci_benchmark(&config.fibonacci_n_values, &mut history, out);
    settle("Fibonacci", fibonacci, out)?;

    let sort = engine.run_sort_benchmark(&config.sort_sizes, &mut history, out);
    settle("Bubble sort", sort, out)?;

    let sieve = engine.run_sieve_benchmark(&config.sieve_limits, &mut history, out);
    settle("Prime number generation", sieve, out)?;

    out.lines(&summary::summary(&history))?;
    out.lines(&summary::footer())?;

    let elapsed = started.elapsed();
    info!(
        records = history.len(),
        total_score = history.total_score(),
        elapsed = %format_duration(elapsed),
        "benchmark finished"
    );

    Ok(RunReport::new(system_info, config.clone(), history, elapsed.as_secs_f64()))
}

/// Decide whether a category failure ends the run or only that category
fn settle<T>(category: &str, outcome: Result<T>, out: &mut dyn LineSink) -> Result<()> {
    match outcome {
        Ok(_) => Ok(()),
        Err(e) if is_fatal_for_run(&e) => Err(e),
        Err(e) => {
            warn!(category, error = %e, "benchmark category aborted");
            out.line(&format!("ERROR: {} benchmark aborted: {}", category, e))
        }
    }
}
