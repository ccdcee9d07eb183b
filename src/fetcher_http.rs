//! HTTP-based page fetcher using reqwest.

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::fetcher::PageFetcher;
use crate::Result;

/// Fixed desktop browser identity presented to the site.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/44.0.2403.157 Safari/537.36";

/// Locale hint sent with every request.
const ACCEPT_LANGUAGE: &str = "en-US, en;q=0.5";

/// A page fetcher that uses plain HTTP requests via reqwest.
///
/// A fresh client is built for every call, scoping the connection to that
/// single fetch. Non-2xx responses are reported as fetch errors; there is
/// no automatic retry.
pub struct HttpFetcher;

impl HttpFetcher {
    /// Creates a new `HttpFetcher`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(url)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await?
            .error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}
