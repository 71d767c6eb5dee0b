use super::common::{CommonArgs, LogLevel, Settings, error_chain, init_logging};
use super::{Host, ProgressReporter};
use crate::Result;
use crate::facts::{Progress, aggregate_all};
use crate::reports::{generate_console, generate_html, generate_json};
use crate::stats::AggregationResult;
use camino::Utf8PathBuf;
use chrono::Local;
use clap::Parser;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::{IsTerminal, Write, stderr, stdout};

const LOG_TARGET: &str = "    report";

/// How long downloading may take before the progress indicator appears.
const PROGRESS_DELAY: Duration = Duration::from_millis(300);

#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output the summary to an HTML file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub html: Option<Utf8PathBuf>,

    /// Output the summary to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the summary to the console. This is the default when no other report is requested.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

/// Collect the account's repositories and produce the requested reports.
///
/// A failure while collecting is reported on the host's error stream and ends the process with exit
/// code 1. Configuration and report-writing problems are returned as errors.
pub async fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let settings = Settings::from_args(&args.common)?;
    log::debug!(target: LOG_TARGET, "Using {settings:?}");

    let source = settings.data_source()?;
    log::debug!(target: LOG_TARGET, "Collecting the repositories of '{}' from {}", source.account(), source.base_url());

    // Logging and the progress indicator would fight over stderr.
    let progress = (args.common.log_level == LogLevel::None)
        .then(|| ProgressReporter::new(PROGRESS_DELAY, args.common.color.use_colors(stderr().is_terminal())));

    let result = match aggregate_all(&source, settings.page_size, progress.as_ref().map(|p| p as &dyn Progress)).await {
        Ok(result) => result,
        Err(e) => {
            log::error!(target: LOG_TARGET, "Unable to collect repositories for '{}': {e}", settings.account);
            let _ = writeln!(host.error(), "Error: {}", error_chain(&e));
            host.exit(1);
            return Ok(());
        }
    };

    log::info!(
        target: LOG_TARGET,
        "Tallied {} repositories in {} languages",
        result.total_repositories,
        result.counts.len()
    );

    write_reports(host, args, &settings, &result)
}

fn write_reports<H: Host>(host: &mut H, args: &ReportArgs, settings: &Settings, result: &AggregationResult) -> Result<()> {
    let generating_reports = args.html.is_some() || args.json.is_some();

    if args.console || !generating_reports {
        let mut console_output = String::new();
        generate_console(result, args.common.color.use_colors(stdout().is_terminal()), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.html {
        let mut html = String::new();
        generate_html(result, &mut html)?;
        fs::write(filename, html).into_app_err_with(|| format!("writing HTML report to {filename}"))?;
        log::info!(target: LOG_TARGET, "Wrote HTML report to {filename}");
    }

    if let Some(filename) = &args.json {
        let mut json = String::new();
        generate_json(result, &settings.account, Local::now(), &mut json)?;
        fs::write(filename, json).into_app_err_with(|| format!("writing JSON report to {filename}"))?;
        log::info!(target: LOG_TARGET, "Wrote JSON report to {filename}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::ColorMode;
    use crate::commands::host::TestHost;

    fn args(html: Option<Utf8PathBuf>, json: Option<Utf8PathBuf>, console: bool) -> ReportArgs {
        ReportArgs {
            common: CommonArgs {
                user: "octocat".to_string(),
                token: None,
                config: None,
                page_size: None,
                api_url: None,
                color: ColorMode::Never,
                log_level: LogLevel::None,
            },
            html,
            json,
            console,
        }
    }

    fn settings() -> Settings {
        Settings {
            account: "octocat".to_string(),
            token: None,
            page_size: crate::facts::DEFAULT_PAGE_SIZE,
            api_base_url: "http://localhost".to_string(),
            request_timeout: Duration::from_secs(1),
            port: 3000,
        }
    }

    fn sample() -> AggregationResult {
        AggregationResult {
            counts: [("Go".to_string(), 1)].into_iter().collect(),
            total_repositories: 1,
            total_size_kib: 1024,
        }
    }

    #[test]
    fn test_console_is_default() {
        let mut host = TestHost::new();
        write_reports(&mut host, &args(None, None, false), &settings(), &sample()).unwrap();

        assert!(host.output_str().contains("Go: 1 (100.00%)"));
        assert!(host.output_str().ends_with("Total size: 1.00 MB\n"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_file_reports_suppress_console() {
        let tmp = tempfile::tempdir().unwrap();
        let html = Utf8PathBuf::try_from(tmp.path().join("langs.html")).unwrap();
        let json = Utf8PathBuf::try_from(tmp.path().join("langs.json")).unwrap();

        let mut host = TestHost::new();
        write_reports(&mut host, &args(Some(html.clone()), Some(json.clone()), false), &settings(), &sample()).unwrap();

        assert!(host.output_str().is_empty());
        assert!(fs::read_to_string(&html).unwrap().contains("<td>Go</td><td>1</td><td>(100.00%)</td>"));
        assert!(fs::read_to_string(&json).unwrap().contains("\"account\": \"octocat\""));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_console_flag_with_file_report() {
        let tmp = tempfile::tempdir().unwrap();
        let html = Utf8PathBuf::try_from(tmp.path().join("langs.html")).unwrap();

        let mut host = TestHost::new();
        write_reports(&mut host, &args(Some(html.clone()), None, true), &settings(), &sample()).unwrap();

        assert!(host.output_str().contains("Number of repositories: 1"));
        assert!(html.exists());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unwritable_report_path_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let html = Utf8PathBuf::try_from(tmp.path().join("missing-dir").join("langs.html")).unwrap();

        let mut host = TestHost::new();
        let err = write_reports(&mut host, &args(Some(html), None, false), &settings(), &sample()).unwrap_err();
        assert!(err.to_string().contains("writing HTML report"));
    }
}
