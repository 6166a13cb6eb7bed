//! Report text blocks
//!
//! Builds the banner, system header, per-size matrix details, end-of-run
//! summary and footer as plain lines for a [`LineSink`](super::LineSink).

use crate::models::{ExecutionTime, MatrixResult, ResultsHistory, SystemInfo};
use crate::util::units::{format_grouped, format_seconds};
use crate::APP_TITLE;

const RULE_WIDTH: usize = 60;

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Tool name, version and author, closed by a rule line
pub fn banner() -> Vec<String> {
    vec![
        APP_TITLE.to_string(),
        format!("Version: {}", env!("CARGO_PKG_VERSION")),
        format!("Author: {}", env!("CARGO_PKG_AUTHORS").replace(':', ", ")),
        "-".repeat(67),
    ]
}

/// System information block printed once before any benchmark
pub fn system_header(info: &SystemInfo) -> Vec<String> {
    vec![
        format!("Date of testing: {}", info.timestamp),
        "System Information".to_string(),
        rule('='),
        format!("Operating System: {}", info.os_description()),
        format!("Processor: {}", info.processor),
        format!("Rust Version: {}", info.runtime_version),
        rule('='),
    ]
}

/// Detailed statistics for one matrix size
pub fn matrix_details(result: &MatrixResult) -> Vec<String> {
    vec![
        String::new(),
        "Detailed Performance Results".to_string(),
        rule('='),
        format!("Matrix Size: {}x{}", result.size, result.size),
        format!("Total Iterations: {}", result.total_iterations),
        rule('-'),
        format!("Minimum Time: {} seconds", format_seconds(result.min_time)),
        format!("Maximum Time: {} seconds", format_seconds(result.max_time)),
        format!("Mean Time: {} seconds", format_seconds(result.mean_time)),
        format!("Median Time: {} seconds", format_seconds(result.median_time)),
        format!("Standard Deviation: {} seconds", format_seconds(result.std_dev)),
        format!(
            "Operations per Second: {}",
            format_grouped(result.operations_per_second, 2)
        ),
        format!(
            "Performance Score: {}",
            format_grouped(result.performance_score, 2)
        ),
        rule('='),
    ]
}

/// End-of-run summary of every recorded result, grouped by workload,
/// followed by the total score line
pub fn summary(history: &ResultsHistory) -> Vec<String> {
    let mut lines = vec![String::new(), "Benchmark Summary".to_string(), rule('=')];

    lines.push(String::new());
    lines.push("Matrix Multiplication Results:".to_string());
    for m in history.matrix() {
        lines.push(format!("Size {}x{}:", m.size, m.size));
        lines.push(format!("  Median time: {} seconds", format_seconds(m.median_time)));
        lines.push(format!(
            "  Operations/second: {}",
            format_grouped(m.operations_per_second, 2)
        ));
        lines.push(format!(
            "  Coefficient of variation: {:.2}%",
            m.coefficient_of_variation()
        ));
        lines.push(format!(
            "  Performance Score: {}",
            format_grouped(m.performance_score, 2)
        ));
    }

    lines.push(String::new());
    lines.push("Recursive Fibonacci Results:".to_string());
    for f in history.fibonacci() {
        lines.push(format!("n={}:", f.n));
        match f.execution_time {
            ExecutionTime::Measured(seconds) => {
                lines.push(format!("  Time taken: {} seconds", format_seconds(seconds)));
                lines.push(format!("  Performance Score: {:.2}", f.performance_score));
            }
            ExecutionTime::Unavailable => {
                lines.push("  Calculation failed due to recursion depth limit.".to_string());
            }
        }
    }

    lines.push(String::new());
    lines.push("Bubble Sort Results:".to_string());
    for s in history.sort() {
        lines.push(format!("List size {}:", s.size));
        lines.push(format!("  Time taken: {} seconds", format_seconds(s.execution_time)));
        lines.push(format!("  Performance Score: {:.2}", s.performance_score));
    }

    lines.push(String::new());
    lines.push("Prime Number Generation Results:".to_string());
    for p in history.sieve() {
        lines.push(format!("Limit {}:", p.limit));
        lines.push(format!("  Primes found: {}", p.primes_found));
        lines.push(format!("  Time taken: {} seconds", format_seconds(p.execution_time)));
        lines.push(format!("  Performance Score: {:.2}", p.performance_score));
    }

    lines.push(String::new());
    lines.push(total_score_line(history.total_score()));
    lines
}

pub fn total_score_line(total: f64) -> String {
    format!("Summary Evaluation (Higher is better): {:.6}", total)
}

/// Fixed informational note closing every run
pub fn footer() -> Vec<String> {
    vec![
        String::new(),
        "---".to_string(),
        "Note: every workload is a deliberately naive textbook algorithm. Scores are".to_string(),
        "only comparable between runs with the same configuration, machine and build profile."
            .to_string(),
        String::new(),
    ]
}
