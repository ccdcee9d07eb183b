//! # bookscout
//!
//! An Amazon product scraping library built around a resilient,
//! field-by-field extraction pipeline.
//!
//! - Crawls a search results page into candidate product URLs
//! - Scrapes product pages concurrently under a shared deadline
//! - Extracts each attribute independently, absorbing missing markup
//! - Caches result lists by query with a lazy TTL
//! - Ships an HTTP API, an ISBN-keyed ingest flow, and a CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookscout::{
//!     HttpFetcher, MemoryCache, ProductCrawler, ProductScraper, ProductSearch, SearchRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = Arc::new(HttpFetcher::new());
//!     let search = ProductSearch::new(
//!         ProductCrawler::new(fetcher.clone()),
//!         ProductScraper::new(fetcher),
//!         Arc::new(MemoryCache::new()),
//!     );
//!
//!     let records = search
//!         .search(SearchRequest::new("edward steers jr", 5))
//!         .await?;
//!     for record in &records {
//!         println!("{}: {}", record.title, record.url);
//!     }
//!     Ok(())
//! }
//! ```

mod cache;
mod config;
mod crawler;
mod error;
mod fetcher;
mod fetcher_http;
mod ingest;
mod product;
mod rate_limit;
mod request;
mod scraper;
mod search;
mod selectors;
mod server;
mod store;

pub mod extract;

pub use cache::{MemoryCache, ResultCache};
pub use config::AppConfig;
pub use crawler::ProductCrawler;
pub use error::{Result, ScrapeError};
pub use fetcher::PageFetcher;
pub use fetcher_http::HttpFetcher;
pub use ingest::{run_ingest, store_records, IngestSummary};
pub use product::ProductRecord;
pub use rate_limit::RateLimiter;
pub use request::{SearchRequest, MAX_KEYWORDS_LEN, MAX_RESULTS};
pub use scraper::ProductScraper;
pub use search::{ProductSearch, DEFAULT_CACHE_TTL, DEFAULT_DEADLINE};
pub use server::{run_server, AppState};
pub use store::{MemoryStore, ProductStore, SqliteStore, UpsertOutcome};
