use super::common::round_two_decimals;
use crate::Result;
use crate::stats::{AggregationResult, sorted_view};
use chrono::{DateTime, Local};
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(result: &AggregationResult, account: &str, timestamp: DateTime<Local>, writer: &mut W) -> Result<()> {
    let languages: Vec<_> = sorted_view(result)
        .into_iter()
        .filter_map(|row| {
            row.percentage.map(|percentage| {
                json!({
                    "language": row.label,
                    "count": row.count,
                    "percentage": round_two_decimals(percentage),
                })
            })
        })
        .collect();

    let output = json!({
        "account": account,
        "generated_at": timestamp.to_rfc3339(),
        "total_repositories": result.total_repositories,
        "total_size_kib": result.total_size_kib,
        "total_size_mb": round_two_decimals(result.total_size_mb()),
        "languages": languages,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
