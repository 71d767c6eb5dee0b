//! Summarize the languages used across an account's GitHub repositories.
//!
//! # Quick Start
//!
//! ```bash
//! export GH_USERNAME=octocat
//! export GH_TOKEN=ghp_...
//! gh-langs report
//! ```
//!
//! This prints the number of repositories per primary language, each language's share of the total,
//! and the combined size of all repositories:
//!
//! ```text
//! --------------
//! Number of repositories: 8
//! --------------
//! Ruby: 3 (37.50%)
//! Unknown: 3 (37.50%)
//! JavaScript: 2 (25.00%)
//! --------------
//! Total size: 1.27 MB
//! ```
//!
//! # Reports
//!
//! ```bash
//! gh-langs report --html langs.html --json langs.json
//! gh-langs report --html langs.html --console   # keep the terminal summary too
//! ```
//!
//! # Serving the Summary
//!
//! ```bash
//! gh-langs serve --port 3000
//! ```
//!
//! `GET /` returns the HTML summary, freshly collected on every request.
//!
//! # Configuration
//!
//! Values are taken from, in order of precedence: command-line flags, environment variables
//! (`GH_USERNAME`, `GH_TOKEN`, `PORT`, also read from a `.env` file in the working directory),
//! the configuration file (`gh-langs.toml` or `--config PATH`), and the built-in defaults.
//! `gh-langs init` writes the default configuration file.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use gh_langs::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Host that talks to the real terminal and process.
#[derive(Debug, Clone, Default)]
struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    run(&mut RealHost, std::env::args()).await
}
