use super::common;
use crate::Result;
use crate::stats::{AggregationResult, sorted_view};
use core::fmt::Write;

pub fn generate<W: Write>(result: &AggregationResult, writer: &mut W) -> Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "  <meta charset=\"UTF-8\">")?;
    writeln!(writer, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
    writeln!(writer, "  <title>Github Data</title>")?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;

    write_table(result, writer)?;

    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;

    Ok(())
}

fn write_table<W: Write>(result: &AggregationResult, writer: &mut W) -> Result<()> {
    writeln!(writer, "  <h2>GitHub Repository Data</h2>")?;
    writeln!(writer, "  <table border=\"1\">")?;
    writeln!(writer, "    <tr><th>Language</th><th>Count</th><th>Percentage</th></tr>")?;

    for row in sorted_view(result) {
        let percentage = row
            .percentage
            .map(|p| format!("({}%)", common::format_percentage(p)))
            .unwrap_or_default();

        writeln!(
            writer,
            "    <tr><td>{}</td><td>{}</td><td>{percentage}</td></tr>",
            html_escape(&row.label),
            row.count
        )?;
    }

    writeln!(writer, "  </table>")?;
    writeln!(writer, "  <p>Total size: {} MB</p>", common::format_size_mb(result))?;

    Ok(())
}

fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
