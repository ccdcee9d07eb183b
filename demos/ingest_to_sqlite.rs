//! Example: Scrape a search and persist the records into SQLite.

use std::sync::Arc;

use bookscout::{
    run_ingest, HttpFetcher, MemoryCache, ProductCrawler, ProductScraper, ProductSearch,
    SearchRequest, SqliteStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let fetcher = Arc::new(HttpFetcher::new());
    let search = ProductSearch::new(
        ProductCrawler::new(fetcher.clone()),
        ProductScraper::new(fetcher),
        Arc::new(MemoryCache::new()),
    );

    let mut store = SqliteStore::open("books.db")?;
    let summary = run_ingest(&search, &mut store, SearchRequest::new("edward steers jr", 5)).await?;

    println!(
        "Ingested into books.db: {} added, {} updated, {} skipped",
        summary.added, summary.updated, summary.skipped
    );

    Ok(())
}
