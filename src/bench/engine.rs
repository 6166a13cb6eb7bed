//! Benchmark engine
//!
//! Owns the seeded input generator and the engine-wide settings shared by
//! the workloads. The workloads themselves live in their own modules as
//! `impl BenchmarkEngine` blocks.

use indicatif::{ProgressBar, ProgressStyle};
use crate::bench::fibonacci::RecursionBudget;
use crate::bench::input::InputGenerator;
use crate::bench::matrix::VerificationCase;
use crate::config::BenchmarkConfig;
use crate::report::LineSink;
use crate::Result;

/// Default dimension of the warm-up matrices
pub const DEFAULT_WARMUP_SIZE: usize = 50;

/// Runs the four workloads against one seeded input stream
#[derive(Debug)]
pub struct BenchmarkEngine {
    input: InputGenerator,
    warmup_size: usize,
    recursion: RecursionBudget,
    verification: VerificationCase,
    show_progress: bool,
}

impl BenchmarkEngine {
    /// Create an engine with default settings and the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            input: InputGenerator::new(seed),
            warmup_size: DEFAULT_WARMUP_SIZE,
            recursion: RecursionBudget::default(),
            verification: VerificationCase::default(),
            show_progress: false,
        }
    }

    /// Create an engine from the run configuration
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self {
            input: InputGenerator::new(config.seed),
            warmup_size: config.warmup_size,
            recursion: RecursionBudget {
                min_depth: config.min_recursion_depth,
                max_stack_bytes: config.max_stack_bytes,
            },
            verification: VerificationCase::default(),
            show_progress: false,
        }
    }

    /// Show a progress bar on stderr during long matrix runs
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set the warm-up matrix dimension
    pub fn with_warmup_size(mut self, size: usize) -> Self {
        self.warmup_size = size;
        self
    }

    /// Set the recursion depth/stack budget of the Fibonacci workload
    pub fn with_recursion_budget(mut self, budget: RecursionBudget) -> Self {
        self.recursion = budget;
        self
    }

    /// Replace the correctness gate's worked example
    pub fn with_verification_case(mut self, case: VerificationCase) -> Self {
        self.verification = case;
        self
    }

    /// The input generator every workload draws from
    pub fn input(&mut self) -> &mut InputGenerator {
        &mut self.input
    }

    pub fn seed(&self) -> u64 {
        self.input.seed()
    }

    pub fn warmup_size(&self) -> usize {
        self.warmup_size
    }

    pub fn recursion_budget(&self) -> RecursionBudget {
        self.recursion
    }

    pub fn verification_case(&self) -> &VerificationCase {
        &self.verification
    }

    pub(crate) fn progress_bar(&self, total: u64, label: &'static str) -> ProgressBar {
        if !self.show_progress || total == 0 {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template("{spinner} {prefix} [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::new(total).with_style(style);
        bar.set_prefix(label);
        bar
    }
}

/// Emit a report line without tearing an active progress bar
pub(crate) fn emit(progress: &ProgressBar, out: &mut dyn LineSink, text: &str) -> Result<()> {
    progress.suspend(|| out.line(text))
}
