//! Retrieval and normalization of repository records
//!
//! # Implementation Model
//!
//! Records come from a [`DataSource`], an abstract paginated API that reports the total number of
//! matching repositories alongside each page. [`collect_all`] asks for page 1, derives the last page
//! from the reported total, and then requests the remaining pages one after another, concatenating
//! the records in page order. [`aggregate_all`] drives the same loop but feeds every page straight
//! into an [`Aggregator`](crate::stats::Aggregator) instead of buffering the full record set.
//!
//! [`GitHubSource`] is the production data source, backed by GitHub's repository search endpoint.
//! Every raw item it receives goes through [`normalize`] so the rest of the crate only ever sees
//! complete [`RepositoryRecord`] values.

mod collector;
mod data_source;
mod github;
mod progress;
mod record;

pub use collector::{CollectError, DEFAULT_PAGE_SIZE, aggregate_all, collect_all, last_page};
pub use data_source::{DataSource, DataSourceError, PageResult};
pub use github::{DEFAULT_API_BASE_URL, GitHubSource};
pub use progress::Progress;
pub use record::{RawRepository, RepositoryRecord, UNKNOWN_LANGUAGE, normalize};
