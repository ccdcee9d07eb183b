//! Batch ingest: search, then persist every record by ISBN.

use tracing::{info, warn};

use crate::product::ProductRecord;
use crate::request::SearchRequest;
use crate::search::ProductSearch;
use crate::store::{ProductStore, UpsertOutcome};
use crate::Result;

/// Tally of what an ingest run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Records stored under a new ISBN.
    pub added: usize,
    /// Records that replaced an existing ISBN.
    pub updated: usize,
    /// Records with no ISBN, which cannot be keyed and are not stored.
    pub skipped: usize,
}

/// Runs a search and upserts every result into the store.
///
/// Records without an ISBN are skipped and tallied, not treated as errors.
/// Store failures propagate immediately.
pub async fn run_ingest(
    search: &ProductSearch,
    store: &mut dyn ProductStore,
    request: SearchRequest,
) -> Result<IngestSummary> {
    let records = search.search(request).await?;
    let summary = store_records(store, &records)?;

    info!(
        "Ingest complete: {} added, {} updated, {} skipped",
        summary.added, summary.updated, summary.skipped
    );
    Ok(summary)
}

/// Upserts already-scraped records, tallying per-record outcomes.
pub fn store_records(
    store: &mut dyn ProductStore,
    records: &[ProductRecord],
) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    for record in records {
        if record.isbn.is_none() {
            warn!("Skipping record with no ISBN: {}", record.url);
            summary.skipped += 1;
            continue;
        }
        match store.upsert(record)? {
            UpsertOutcome::Inserted => summary.added += 1,
            UpsertOutcome::Updated => summary.updated += 1,
        }
    }
    Ok(summary)
}
