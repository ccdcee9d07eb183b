//! Page fetcher abstraction for retrieving HTML content.

use async_trait::async_trait;

use crate::Result;

/// Trait for fetching the full HTML content of a URL.
///
/// Implementations make exactly one attempt per call: retry policy, if
/// any, belongs to the caller. `fetch` is a simple URL-in, HTML-out
/// interface so tests can substitute canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the HTML content of the given URL.
    async fn fetch(&self, url: &str) -> Result<String>;
}
