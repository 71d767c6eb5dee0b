//! GitHub repository search client
//!
//! Minimal client for the `search/repositories` endpoint, restricted to the repositories of one account.

use super::data_source::{DataSource, DataSourceError, PageResult};
use super::record::{RawRepository, normalize};
use core::num::NonZeroU32;
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

const LOG_TARGET: &str = "    github";

/// Default base URL for the GitHub REST API
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    items: Vec<RawRepository>,
}

/// Data source backed by GitHub's repository search.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: reqwest::Client,
    base_url: String,
    account: String,
}

impl GitHubSource {
    /// Create a source listing the repositories owned by `account`.
    ///
    /// When `token` is given, every request carries it as `Authorization: token ...`.
    pub fn new(account: impl Into<String>, token: Option<&str>, base_url: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}")).into_app_err("the GitHub token contains invalid characters")?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent("gh-langs")
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account: account.into(),
        })
    }

    /// The account whose repositories are listed.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DataSource for GitHubSource {
    async fn fetch_page(&self, page_size: NonZeroU32, page_number: u32) -> Result<PageResult, DataSourceError> {
        let url = format!("{}/search/repositories", self.base_url);
        let query = format!("user:{}", self.account);
        let per_page = page_size.to_string();
        let page = page_number.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("per_page", per_page.as_str()), ("page", page.as_str())])
            .send()
            .await
            .map_err(DataSourceError::Transport)?;

        if let Some(remaining) = resp.headers().get("x-ratelimit-remaining").and_then(|v| v.to_str().ok()) {
            log::debug!(target: LOG_TARGET, "Rate limit remaining after page {page_number}: {remaining}");
        }

        let status = resp.status();
        if !status.is_success() {
            log::debug!(target: LOG_TARGET, "Search for '{query}' page {page_number} returned {status}");
            return Err(DataSourceError::Status { status });
        }

        let body = resp.bytes().await.map_err(DataSourceError::Transport)?;
        let search: SearchResponse = serde_json::from_slice(&body).map_err(DataSourceError::Malformed)?;

        if search.incomplete_results {
            log::warn!(target: LOG_TARGET, "GitHub reported incomplete search results for page {page_number}");
        }

        Ok(PageResult {
            total_count: search.total_count,
            records: search.items.into_iter().map(normalize).collect(),
        })
    }
}
