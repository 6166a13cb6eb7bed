//! Data models module
//!
//! Contains the per-workload result records, the append-only results
//! collector and system information.

pub mod result;
pub mod system;

// Re-export commonly used types
pub use result::{
    ExecutionTime,
    FibonacciResult,
    MatrixResult,
    ResultRecord,
    ResultsHistory,
    SieveResult,
    SortResult,
};
pub use system::SystemInfo;
