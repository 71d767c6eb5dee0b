use super::common::{self, SEPARATOR};
use crate::Result;
use crate::stats::{AggregationResult, sorted_view};
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(result: &AggregationResult, use_colors: bool, writer: &mut W) -> Result<()> {
    let cyan = |text: &str| if use_colors { text.cyan().to_string() } else { text.to_string() };
    let magenta = |text: &str| if use_colors { text.magenta().to_string() } else { text.to_string() };

    writeln!(writer, "{}", cyan(SEPARATOR))?;

    for row in sorted_view(result) {
        let count = cyan(&row.count.to_string());
        match row.percentage {
            Some(percentage) => {
                let share = format!("({}%)", common::format_percentage(percentage));
                writeln!(writer, "{}: {count} {}", row.label, magenta(&share))?;
            }
            None => writeln!(writer, "{}: {count}", row.label)?,
        }

        if row.is_total {
            writeln!(writer, "{}", cyan(SEPARATOR))?;
        }
    }

    writeln!(writer, "{}", cyan(SEPARATOR))?;
    writeln!(writer, "Total size: {} MB", magenta(&common::format_size_mb(result)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn sample() -> AggregationResult {
        let counts: IndexMap<String, u64> = [("Ruby", 3), ("JavaScript", 2), ("Unknown", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        AggregationResult {
            counts,
            total_repositories: 8,
            total_size_kib: 1300,
        }
    }

    #[test]
    fn test_generate_no_colors() {
        let mut output = String::new();
        generate(&sample(), false, &mut output).unwrap();

        assert_eq!(
            output,
            "--------------\n\
             Number of repositories: 8\n\
             --------------\n\
             Ruby: 3 (37.50%)\n\
             Unknown: 3 (37.50%)\n\
             JavaScript: 2 (25.00%)\n\
             --------------\n\
             Total size: 1.27 MB\n"
        );
    }

    #[test]
    fn test_generate_empty() {
        let mut output = String::new();
        generate(&AggregationResult::default(), false, &mut output).unwrap();

        assert_eq!(
            output,
            "--------------\n\
             Number of repositories: 0\n\
             --------------\n\
             --------------\n\
             Total size: 0.00 MB\n"
        );
    }

    #[test]
    fn test_separator_follows_total_row_when_tied() {
        let result = AggregationResult {
            counts: std::iter::once(("Go".to_string(), 2)).collect(),
            total_repositories: 2,
            total_size_kib: 2048,
        };

        let mut output = String::new();
        generate(&result, false, &mut output).unwrap();

        assert_eq!(
            output,
            "--------------\n\
             Go: 2 (100.00%)\n\
             Number of repositories: 2\n\
             --------------\n\
             --------------\n\
             Total size: 2.00 MB\n"
        );
    }

    #[test]
    fn test_generate_with_colors() {
        let mut output = String::new();
        generate(&sample(), true, &mut output).unwrap();

        assert!(output.contains("\u{1b}["));
        assert!(output.contains(&"--------------".cyan().to_string()));
        assert!(output.contains(&format!("Ruby: {} {}", "3".cyan(), "(37.50%)".magenta())));
        assert!(output.contains(&format!("Total size: {} MB", "1.27".magenta())));
    }
}
