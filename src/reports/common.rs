//! Common utilities shared across report generators.

use crate::stats::AggregationResult;

/// Line framing the total row and the language rows in text output.
pub const SEPARATOR: &str = "--------------";

/// Format a percentage with exactly two decimals, without the `%` sign.
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.2}")
}

/// Format the combined repository size in MiB with exactly two decimals.
pub fn format_size_mb(result: &AggregationResult) -> String {
    format!("{:.2}", result.total_size_mb())
}

/// Round to two decimals, matching the precision of the text reports.
pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
