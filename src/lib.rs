//! gh-langs crate
//!
//! This crate is an implementation detail of the `gh-langs` tool. It collects every repository an account
//! owns from GitHub's repository search API, tallies the repositories by primary language, and renders
//! the resulting summary for the terminal, as HTML, or as JSON.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface, configuration, and the HTTP server
//! - [`facts`]: Paginated retrieval and normalization of repository records
//! - [`stats`]: Single-pass aggregation and the sorted summary view
//! - [`reports`]: Console, HTML, and JSON renderings of a summary

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod facts;

#[doc(hidden)]
pub mod reports;

#[doc(hidden)]
pub mod stats;

pub use crate::commands::{Host, run};
