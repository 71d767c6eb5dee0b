use super::{AggregationResult, TOTAL_LABEL};
use core::cmp::Reverse;

/// One presentation row of the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub count: u64,

    /// Share of all repositories, in percent. `None` for the total row.
    pub percentage: Option<f64>,

    /// Whether this row carries the total number of repositories.
    pub is_total: bool,
}

/// Percentage of `count` relative to `total`, or 0 when there is nothing to compare against.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "repository counts are far below 2^52")]
pub fn percentage_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    count as f64 / total as f64 * 100.0
}

/// Rows ordered by count, largest first.
///
/// The total row takes part in the ordering like any other row, so it normally comes first. Equal
/// counts keep first-seen order, with the total row placed after the languages it ties with.
#[must_use]
pub fn sorted_view(result: &AggregationResult) -> Vec<SummaryRow> {
    let mut rows: Vec<_> = result
        .counts_with_total()
        .into_iter()
        .map(|(label, count)| {
            let is_total = label == TOTAL_LABEL;
            SummaryRow {
                percentage: (!is_total).then(|| percentage_of(count, result.total_repositories)),
                label,
                count,
                is_total,
            }
        })
        .collect();

    rows.sort_by_key(|row| Reverse(row.count));
    rows
}
