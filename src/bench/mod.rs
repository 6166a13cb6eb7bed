//! Benchmark engine module
//!
//! Contains the seeded input generator, the engine shared by the
//! workloads, and the four workload implementations.

pub mod engine;
pub mod fibonacci;
pub mod input;
pub mod matrix;
pub mod sieve;
pub mod sort;

// Re-export commonly used types
pub use engine::BenchmarkEngine;
pub use fibonacci::{recursive_fibonacci, RecursionBudget};
pub use input::InputGenerator;
pub use matrix::{multiply, verify_case, Matrix, VerificationCase};
pub use sieve::naive_primes;
pub use sort::bubble_sort;
