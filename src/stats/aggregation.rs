use crate::facts::RepositoryRecord;
use indexmap::IndexMap;

/// Label of the row carrying the total number of repositories.
pub const TOTAL_LABEL: &str = "Number of repositories";

const KIB_PER_MIB: f64 = 1024.0;

/// Per-language repository counts plus run totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    /// Repositories per language, in first-seen order.
    pub counts: IndexMap<String, u64>,

    /// Number of repositories tallied.
    pub total_repositories: u64,

    /// Combined size of all repositories, in KiB.
    pub total_size_kib: u64,
}

impl AggregationResult {
    /// Language counts followed by the [`TOTAL_LABEL`] entry.
    ///
    /// A language that happens to be named [`TOTAL_LABEL`] is overwritten by the total in this view,
    /// and the entry keeps that language's position.
    #[must_use]
    pub fn counts_with_total(&self) -> IndexMap<String, u64> {
        let mut counts = self.counts.clone();
        let _ = counts.insert(TOTAL_LABEL.to_string(), self.total_repositories);
        counts
    }

    /// Combined size in MiB.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "sizes are far below 2^52 KiB")]
    pub fn total_size_mb(&self) -> f64 {
        self.total_size_kib as f64 / KIB_PER_MIB
    }
}

/// Incremental single-pass tally.
#[derive(Debug, Default)]
pub struct Aggregator {
    result: AggregationResult,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: &RepositoryRecord) {
        *self.result.counts.entry(record.language.clone()).or_insert(0) += 1;
        self.result.total_repositories += 1;
        self.result.total_size_kib += record.size_kib;
    }

    #[must_use]
    pub fn finish(self) -> AggregationResult {
        self.result
    }
}

/// Tally a sequence of records.
pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a RepositoryRecord>) -> AggregationResult {
    let mut aggregator = Aggregator::new();
    for record in records {
        aggregator.add(record);
    }

    aggregator.finish()
}
