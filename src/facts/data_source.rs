use super::RepositoryRecord;

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Total number of repositories matching the query, across all pages.
    pub total_count: u64,

    /// The normalized records on this page, in server order.
    pub records: Vec<RepositoryRecord>,
}

/// Why a single page could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// The request never produced a response.
    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: reqwest::StatusCode },

    /// The response body was not a valid search result payload.
    #[error("malformed response body")]
    Malformed(#[source] serde_json::Error),
}

/// A paginated source of repository records.
///
/// Implementations know which account they query and which credential they use; the collector only
/// chooses the page size and the page number.
pub trait DataSource: Send + Sync {
    /// Fetch one page. `page_number` is 1-based.
    fn fetch_page(
        &self,
        page_size: core::num::NonZeroU32,
        page_number: u32,
    ) -> impl Future<Output = Result<PageResult, DataSourceError>> + Send;
}
