//! Product page scraping.

use std::sync::Arc;

use scraper::Html;
use tracing::debug;

use crate::fetcher::PageFetcher;
use crate::product::ProductRecord;
use crate::{extract, Result};

/// Scrapes a single product page into a structured record.
///
/// Each call is independent: one URL in, one record or a fetch failure
/// out. A fetch failure fails the whole record; extraction failures never
/// do, since every field falls back to its absent value on its own.
pub struct ProductScraper {
    fetcher: Arc<dyn PageFetcher>,
}

impl ProductScraper {
    /// Creates a new scraper using the given fetcher.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches the product page at `url` and extracts a record from it.
    pub async fn scrape(&self, url: &str) -> Result<ProductRecord> {
        let html = self.fetcher.fetch(url).await?;
        let record = extract_record(url, &html);
        debug!("Scraped {}: title={:?}", url, record.title);
        Ok(record)
    }
}

/// Runs every field extractor against one parsed document.
///
/// Parsing stays synchronous so the document never lives across an await.
fn extract_record(url: &str, html: &str) -> ProductRecord {
    let document = Html::parse_document(html);
    ProductRecord {
        isbn: extract::isbn(url),
        title: extract::title(&document),
        authors: extract::authors(&document),
        description: extract::description(&document),
        url: url.to_string(),
        cover_image_url: extract::cover_image_url(&document),
        price: extract::price(&document),
        rating: extract::rating(&document),
        review_count: extract::review_count(&document),
    }
}
