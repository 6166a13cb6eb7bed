//! Number and duration formatting utilities
//!
//! Provides the fixed-precision and thousands-grouped formatting used by
//! the console/log report, plus human-readable wall-clock durations.

use std::time::Duration;

/// Format seconds with microsecond precision
///
/// # Examples
/// ```
/// use cpubench::util::units::format_seconds;
///
/// assert_eq!(format_seconds(1.5), "1.500000");
/// assert_eq!(format_seconds(0.0000004), "0.000000");
/// ```
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.6}", seconds)
}

/// Format a number with comma thousands separators and fixed decimals
///
/// # Examples
/// ```
/// use cpubench::util::units::format_grouped;
///
/// assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
/// assert_eq!(format_grouped(-1000.0, 0), "-1,000");
/// assert_eq!(format_grouped(12.5, 2), "12.50");
/// ```
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a wall-clock duration, truncated to milliseconds
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use cpubench::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(90_250)), "1m 30s 250ms");
/// assert_eq!(format_duration(Duration::from_micros(1_500)), "1ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let truncated = Duration::from_millis(duration.as_millis() as u64);
    humantime::format_duration(truncated).to_string()
}
