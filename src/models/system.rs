//! System information captured once per run
//!
//! Every field is best effort: anything that cannot be detected on the
//! current platform falls back to "unknown" instead of failing the run.

use chrono::Local;
use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "unknown";

/// System information captured at benchmark time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name (e.g. "linux")
    pub os_name: String,
    /// Kernel or OS release string
    pub os_version: String,
    /// CPU architecture (e.g. "x86_64")
    pub architecture: String,
    /// Processor model name
    pub processor: String,
    /// `rustc --version` of the compiler that built the binary
    pub runtime_version: String,
    /// Local time the run started, "%Y-%m-%d %H:%M:%S"
    pub timestamp: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            os_name: non_empty(std::env::consts::OS),
            os_version: detect_os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            architecture: non_empty(std::env::consts::ARCH),
            processor: detect_cpu().unwrap_or_else(|| UNKNOWN.to_string()),
            runtime_version: runtime_version(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl SystemInfo {
    /// Create system info by detecting current system
    pub fn detect() -> Self {
        Self::default()
    }

    /// "<os> <version> (<arch>)" line for the report header
    pub fn os_description(&self) -> String {
        format!("{} {} ({})", self.os_name, self.os_version, self.architecture)
    }
}

fn non_empty(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// rustc version the binary was compiled with, captured by the build script
fn runtime_version() -> String {
    runtime_version_from(option_env!("CPUBENCH_RUSTC_VERSION"))
}

fn runtime_version_from(captured: Option<&str>) -> String {
    captured
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| UNKNOWN.to_string(), str::to_string)
}

#[cfg(target_os = "linux")]
fn detect_os_version() -> Option<String> {
    let release = std::fs::read_to_string("/proc/sys/kernel/osrelease").ok()?;
    let release = release.trim();
    (!release.is_empty()).then(|| release.to_string())
}

#[cfg(not(target_os = "linux"))]
fn detect_os_version() -> Option<String> {
    // TODO: query the OS release on macOS (sysctl kern.osrelease) and Windows (RtlGetVersion)
    None
}

#[cfg(target_os = "linux")]
fn detect_cpu() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    parse_cpu_model(&cpuinfo)
}

#[cfg(not(target_os = "linux"))]
fn detect_cpu() -> Option<String> {
    None
}

/// Extract the processor model from /proc/cpuinfo-style text
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| {
            let key = key.trim();
            key == "model name" || key == "Hardware" || key == "cpu model"
        })
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
