//! Example: Search Amazon and print the extracted product records.

use std::sync::Arc;

use bookscout::{
    HttpFetcher, MemoryCache, ProductCrawler, ProductScraper, ProductSearch, SearchRequest,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    // One fetcher shared by the crawler and the scraper
    let fetcher = Arc::new(HttpFetcher::new());
    let search = ProductSearch::new(
        ProductCrawler::new(fetcher.clone()),
        ProductScraper::new(fetcher),
        Arc::new(MemoryCache::new()),
    );

    let records = search
        .search(SearchRequest::new("edward steers jr", 5))
        .await?;

    println!("Extracted {} records\n", records.len());
    for (i, record) in records.iter().enumerate() {
        println!("{}. {}", i + 1, record.title);
        if !record.authors.is_empty() {
            println!("   by {}", record.authors.join(", "));
        }
        if let Some(rating) = record.rating {
            println!("   {} stars", rating);
        }
        println!("   {}", record.url);
        println!();
    }

    Ok(())
}
