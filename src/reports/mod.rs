//! Report generation for language summaries
//!
//! Each generator renders an [`AggregationResult`](crate::stats::AggregationResult) through the rows
//! produced by [`sorted_view`](crate::stats::sorted_view), so every format lists languages in the
//! same order and with the same two-decimal percentages:
//! - **Console**: Separator-delimited lines with optional ANSI colors
//! - **HTML**: Self-contained document with a single table, also served by the `serve` command
//! - **JSON**: Machine-readable summary
//!
//! All generators write to a `core::fmt::Write` so callers decide where the text ends up.

mod common;
mod console;
mod html;
mod json;

pub use console::generate as generate_console;
pub use html::generate as generate_html;
pub use json::generate as generate_json;
