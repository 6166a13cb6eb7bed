use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueHint};
use tracing::{error, info};

use cpubench::config::BenchmarkConfig;
use cpubench::error::user_friendly_message;
use cpubench::report::RunLog;
use cpubench::{driver, Result};

#[derive(Debug, Parser)]
#[command(name = "cpubench", version, about = "CPU microbenchmark harness for naive textbook algorithms")]
struct Cli {
    /// Configuration file (TOML). Defaults to the per-user config file if present.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath, conflicts_with = "quick")]
    config: Option<PathBuf>,

    /// Seed for the input generator
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Comma-separated square matrix sizes
    #[arg(long, value_name = "N,..", value_delimiter = ',')]
    matrix_sizes: Option<Vec<usize>>,

    /// Matrix iterations per extended run
    #[arg(long, value_name = "COUNT")]
    iterations: Option<usize>,

    /// Extended runs per matrix size
    #[arg(long, value_name = "COUNT")]
    extended_runs: Option<usize>,

    /// Comma-separated Fibonacci n values
    #[arg(long, value_name = "N,..", value_delimiter = ',', allow_negative_numbers = true)]
    fib: Option<Vec<i64>>,

    /// Comma-separated bubble sort list sizes
    #[arg(long, value_name = "N,..", value_delimiter = ',')]
    sort_sizes: Option<Vec<usize>>,

    /// Comma-separated prime sieve limits
    #[arg(long, value_name = "N,..", value_delimiter = ',', allow_negative_numbers = true)]
    sieve_limits: Option<Vec<i64>>,

    /// Append-only log file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    log_file: Option<PathBuf>,

    /// Also write the full run report as JSON
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,

    /// Use small inputs for a smoke run
    #[arg(long)]
    quick: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Save the effective configuration as the per-user default
    #[arg(long)]
    save_config: bool,
}

fn main() -> ExitCode {
    cpubench::init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "benchmark run failed");
            eprintln!("{}", user_friendly_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    config.validate()?;

    if cli.save_config {
        let path = config.save()?;
        info!(path = %path.display(), "saved configuration");
    }

    let mut log = RunLog::open(&config.log_file)?;
    let report = driver::run(&config, !cli.no_progress, &mut log)?;

    if let Some(path) = cli.json.as_ref() {
        report.write_json(path)?;
        info!(path = %path.display(), "wrote JSON report");
    }

    log.finish()
}

/// Base configuration (explicit file, quick preset or per-user default)
/// with command-line overrides applied
fn resolve_config(cli: &Cli) -> Result<BenchmarkConfig> {
    let mut config = if let Some(path) = cli.config.as_ref() {
        BenchmarkConfig::load_from(path)?
    } else if cli.quick {
        BenchmarkConfig::quick()
    } else {
        BenchmarkConfig::load()?
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(sizes) = cli.matrix_sizes.clone() {
        config.matrix_sizes = sizes;
    }
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(runs) = cli.extended_runs {
        config.extended_runs = runs;
    }
    if let Some(n_values) = cli.fib.clone() {
        config.fibonacci_n_values = n_values;
    }
    if let Some(sizes) = cli.sort_sizes.clone() {
        config.sort_sizes = sizes;
    }
    if let Some(limits) = cli.sieve_limits.clone() {
        config.sieve_limits = limits;
    }
    if let Some(path) = cli.log_file.clone() {
        config.log_file = path;
    }

    Ok(config)
}
