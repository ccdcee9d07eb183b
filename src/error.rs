//! Error types for the scraping library.

use thiserror::Error;

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur while crawling, scraping, or serving results.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Malformed search request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The search page yielded no candidate product URLs.
    #[error("No products found")]
    NoResults,

    /// Candidate pages existed but none produced a usable record.
    #[error("Extraction failed for all candidate pages")]
    ExtractionFailed,

    /// Scrape deadline exceeded.
    #[error("Scrape deadline exceeded")]
    Timeout,

    /// Product store failure.
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error, for custom fetcher or cache implementations.
    #[error("{0}")]
    Other(String),
}
