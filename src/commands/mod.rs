//! Command-line interface and orchestration for gh-langs
//!
//! This module implements the CLI commands and ties the other modules together: it resolves
//! settings, drives the collector, and hands the aggregated summary to the report generators.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **report**: Collect the account's repositories, tally them by language, and print the summary
//!   to the console and/or write HTML and JSON reports
//! - **serve**: Start an HTTP server whose root page renders a freshly collected HTML summary on
//!   every request
//! - **init**: Generate a default configuration file
//!
//! ## Settings
//!
//! Every setting is resolved with the same precedence: command-line flag, then environment variable
//! (`GH_USERNAME`, `GH_TOKEN`, `PORT`), then the `gh-langs.toml` configuration file, and finally the
//! built-in defaults from `default_config.toml`. The account and token are handed to the data
//! source explicitly; nothing below this module reads process state.
//!
//! All commands write through a [`Host`] so tests can capture output and exit codes.

mod common;
mod config;
mod host;
mod init;
mod progress_reporter;
mod report;
mod run;
mod serve;

pub use common::{ColorMode, CommonArgs, LogLevel, Settings};
pub use config::Config;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use serve::{ErrorSink, ServeArgs, router, serve, serve_on};
