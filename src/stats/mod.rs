//! Language statistics over a set of repository records
//!
//! [`Aggregator`] tallies records in a single pass into an [`AggregationResult`]. The result keeps
//! language counts in first-seen order, which is the tie-break used by [`sorted_view`] when it orders
//! the summary rows for presentation.

mod aggregation;
mod summary;

pub use aggregation::{AggregationResult, Aggregator, TOTAL_LABEL, aggregate};
pub use summary::{SummaryRow, percentage_of, sorted_view};
