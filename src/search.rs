//! Search orchestration.

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::cache::ResultCache;
use crate::crawler::ProductCrawler;
use crate::product::ProductRecord;
use crate::request::SearchRequest;
use crate::scraper::ProductScraper;
use crate::{Result, ScrapeError};

/// Default overall deadline for the concurrent scrape phase.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Default lifetime of cached search results.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// The full search pipeline: crawl, scrape concurrently, cache.
pub struct ProductSearch {
    crawler: ProductCrawler,
    scraper: Arc<ProductScraper>,
    cache: Arc<dyn ResultCache>,
    deadline: Duration,
    cache_ttl: Duration,
}

impl ProductSearch {
    /// Creates a pipeline from its collaborators.
    pub fn new(
        crawler: ProductCrawler,
        scraper: ProductScraper,
        cache: Arc<dyn ResultCache>,
    ) -> Self {
        Self {
            crawler,
            scraper: Arc::new(scraper),
            cache,
            deadline: DEFAULT_DEADLINE,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Sets the overall scrape deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the lifetime of cached results.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Runs a search request through the pipeline.
    ///
    /// Candidate pages are scraped concurrently, all launched together
    /// against the shared deadline. Pages that fail, hang past the
    /// deadline, or produce a record with no title are dropped; the
    /// survivors come back in crawler order, never completion order.
    pub async fn search(&self, request: SearchRequest) -> Result<Vec<ProductRecord>> {
        request.validate()?;

        let keywords = request.keywords.trim();
        let cache_key = format!("{}:{}", keywords, request.num_results);

        if let Some(records) = self.cache.get(&cache_key).await {
            debug!("Cache hit for {:?}", cache_key);
            return Ok(records);
        }

        let mut urls = self.crawler.find_product_urls(keywords).await;
        if urls.is_empty() {
            return Err(ScrapeError::NoResults);
        }
        urls.truncate(request.num_results as usize);

        debug!("Scraping {} product pages", urls.len());

        let futures: Vec<_> = urls
            .iter()
            .map(|url| {
                let scraper = Arc::clone(&self.scraper);
                let url = url.clone();
                let deadline = self.deadline;

                async move {
                    match timeout(deadline, scraper.scrape(&url)).await {
                        Ok(Ok(record)) => (Some(record), false),
                        Ok(Err(e)) => {
                            warn!("Scrape of {} failed: {}", url, e);
                            (None, false)
                        }
                        Err(_) => {
                            warn!("Scrape of {} timed out", url);
                            (None, true)
                        }
                    }
                }
            })
            .collect();

        // join_all yields outcomes in input order, which keeps the
        // crawler's ordering through the concurrent phase.
        let outcomes = join_all(futures).await;
        let deadline_hit = outcomes.iter().any(|(_, timed_out)| *timed_out);

        let mut records = Vec::new();
        for (record, _) in outcomes {
            let Some(record) = record else { continue };
            if record.is_valid() {
                records.push(record);
            } else {
                warn!("Dropping record with no title: {}", record.url);
            }
        }

        if records.is_empty() {
            return Err(if deadline_hit {
                ScrapeError::Timeout
            } else {
                ScrapeError::ExtractionFailed
            });
        }

        self.cache
            .set_with_ttl(&cache_key, records.clone(), self.cache_ttl)
            .await;

        Ok(records)
    }
}
