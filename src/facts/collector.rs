use super::data_source::{DataSource, DataSourceError, PageResult};
use super::progress::{NoProgress, Progress};
use super::record::RepositoryRecord;
use crate::stats::{AggregationResult, Aggregator};
use core::num::NonZeroU32;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const LOG_TARGET: &str = " collector";

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(19);

/// A page fetch failed, aborting the whole collection.
#[derive(Debug, thiserror::Error)]
#[error("fetching page {page} failed")]
pub struct CollectError {
    /// The 1-based page that could not be fetched.
    pub page: u32,

    #[source]
    pub source: DataSourceError,
}

/// Number of pages needed to hold `total_count` records.
#[must_use]
pub fn last_page(total_count: u64, page_size: NonZeroU32) -> u32 {
    u32::try_from(total_count.div_ceil(u64::from(page_size.get()))).unwrap_or(u32::MAX)
}

/// Fetch every record the source reports, in page order.
///
/// Nothing is returned unless every page was fetched.
pub async fn collect_all<S: DataSource>(
    source: &S,
    page_size: NonZeroU32,
    progress: Option<&dyn Progress>,
) -> Result<Vec<RepositoryRecord>, CollectError> {
    let progress = progress.unwrap_or(&NoProgress);
    let mut records = Vec::new();

    let outcome = for_each_page(source, page_size, progress, |page| records.extend(page)).await;
    progress.done();

    let total_count = outcome?;
    if records.len() as u64 != total_count {
        log::warn!(
            target: LOG_TARGET,
            "Server reported {total_count} repositories but {} were returned",
            records.len()
        );
    }

    Ok(records)
}

/// Fetch every page and tally the records as they arrive.
///
/// Produces the same result as aggregating the output of [`collect_all`] without holding the full
/// record set in memory.
pub async fn aggregate_all<S: DataSource>(
    source: &S,
    page_size: NonZeroU32,
    progress: Option<&dyn Progress>,
) -> Result<AggregationResult, CollectError> {
    let progress = progress.unwrap_or(&NoProgress);
    let mut aggregator = Aggregator::new();

    let outcome = for_each_page(source, page_size, progress, |page| {
        for record in &page {
            aggregator.add(record);
        }
    })
    .await;
    progress.done();

    let _ = outcome?;
    Ok(aggregator.finish())
}

/// Drive the page loop, handing each page's records to `sink`. Returns the total count from page 1.
async fn for_each_page<S, F>(source: &S, page_size: NonZeroU32, progress: &dyn Progress, mut sink: F) -> Result<u64, CollectError>
where
    S: DataSource,
    F: FnMut(Vec<RepositoryRecord>) + Send,
{
    progress.set_phase("Downloading");
    progress.set_indeterminate(Box::new(|| "page 1".to_string()));

    let first = fetch(source, page_size, 1).await?;
    let total_count = first.total_count;
    let page_count = last_page(total_count, page_size);

    log::info!(
        target: LOG_TARGET,
        "Found {total_count} repositories, fetching {} page(s) of up to {page_size}",
        page_count.max(1)
    );
    sink(first.records);

    let fetched = Arc::new(AtomicU64::new(1));
    let fetched_for_progress = Arc::clone(&fetched);
    progress.set_determinate(Box::new(move || {
        let fetched = fetched_for_progress.load(Ordering::Relaxed);
        let pages = u64::from(page_count.max(1));
        (pages, fetched, format!("page {fetched}/{pages}"))
    }));

    for page in 2..=page_count {
        let result = fetch(source, page_size, page).await?;
        sink(result.records);
        let _ = fetched.fetch_add(1, Ordering::Relaxed);
    }

    Ok(total_count)
}

async fn fetch<S: DataSource>(source: &S, page_size: NonZeroU32, page: u32) -> Result<PageResult, CollectError> {
    log::debug!(target: LOG_TARGET, "Requesting page {page}");

    match source.fetch_page(page_size, page).await {
        Ok(result) => {
            log::debug!(target: LOG_TARGET, "Received {} record(s) on page {page}", result.records.len());
            Ok(result)
        }
        Err(source) => {
            log::debug!(target: LOG_TARGET, "Page {page} failed: {source}");
            Err(CollectError { page, source })
        }
    }
}
