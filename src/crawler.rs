//! Search results crawling.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use crate::fetcher::PageFetcher;
use crate::selectors::search;

/// Site origin used for the search endpoint and to absolutize links.
const ORIGIN: &str = "https://www.amazon.com";

/// Finds candidate product URLs for a free-text query.
pub struct ProductCrawler {
    fetcher: Arc<dyn PageFetcher>,
}

impl ProductCrawler {
    /// Creates a new crawler using the given fetcher.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches the search results page and returns product URLs in page
    /// order, duplicates included.
    ///
    /// A failed fetch is indistinguishable from zero results here: the
    /// error is logged and an empty list returned.
    pub async fn find_product_urls(&self, query: &str) -> Vec<String> {
        let url = search_url(query);
        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Search page fetch failed: {}", e);
                return Vec::new();
            }
        };

        let urls = parse_product_urls(&html);
        debug!("Found {} candidate URLs for {:?}", urls.len(), query);
        urls
    }
}

/// Builds the search URL for a query.
fn search_url(query: &str) -> String {
    format!("{}/s?k={}", ORIGIN, urlencoding::encode(query))
}

/// Harvests result links and absolutizes them against the site origin.
fn parse_product_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let origin = Url::parse(ORIGIN).expect("origin URL is valid");

    document
        .select(&search::RESULT_LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| origin.join(href).ok())
        .map(|u| u.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Result, ScrapeError};
    use async_trait::async_trait;

    struct FakeFetcher(String);

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Err(ScrapeError::NoResults)
        }
    }

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            search_url("edward steers jr"),
            "https://www.amazon.com/s?k=edward%20steers%20jr"
        );
    }

    #[test]
    fn test_search_url_encodes_reserved_characters() {
        assert_eq!(
            search_url("c&v: 100%"),
            "https://www.amazon.com/s?k=c%26v%3A%20100%25"
        );
    }

    #[tokio::test]
    async fn test_find_product_urls_absolutizes_relative_links() {
        let html = r#"
            <html><body>
                <a class="a-link-normal s-no-outline" href="/dp/0813141117/ref=sr_1_1">a</a>
                <a class="a-link-normal s-no-outline" href="/dp/B0ABC123/ref=sr_1_2">b</a>
            </body></html>
        "#;
        let crawler = ProductCrawler::new(Arc::new(FakeFetcher(html.to_string())));
        let urls = crawler.find_product_urls("lincoln").await;

        assert_eq!(
            urls,
            vec![
                "https://www.amazon.com/dp/0813141117/ref=sr_1_1",
                "https://www.amazon.com/dp/B0ABC123/ref=sr_1_2",
            ]
        );
    }

    #[tokio::test]
    async fn test_find_product_urls_keeps_page_order_and_duplicates() {
        let html = r#"
            <html><body>
                <a class="a-link-normal s-no-outline" href="/dp/SECOND">s</a>
                <a class="a-link-normal s-no-outline" href="/dp/FIRST">f</a>
                <a class="a-link-normal s-no-outline" href="/dp/SECOND">s</a>
            </body></html>
        "#;
        let crawler = ProductCrawler::new(Arc::new(FakeFetcher(html.to_string())));
        let urls = crawler.find_product_urls("anything").await;

        assert_eq!(
            urls,
            vec![
                "https://www.amazon.com/dp/SECOND",
                "https://www.amazon.com/dp/FIRST",
                "https://www.amazon.com/dp/SECOND",
            ]
        );
    }

    #[tokio::test]
    async fn test_find_product_urls_skips_anchors_without_href() {
        let html = r#"
            <html><body>
                <a class="a-link-normal s-no-outline">no href</a>
                <a class="a-link-normal s-no-outline" href="/dp/KEPT">kept</a>
            </body></html>
        "#;
        let crawler = ProductCrawler::new(Arc::new(FakeFetcher(html.to_string())));
        let urls = crawler.find_product_urls("anything").await;

        assert_eq!(urls, vec!["https://www.amazon.com/dp/KEPT"]);
    }

    #[tokio::test]
    async fn test_find_product_urls_ignores_other_link_classes() {
        let html = r#"
            <html><body>
                <a class="a-link-normal" href="/dp/NOPE">plain</a>
                <a class="s-no-outline" href="/dp/NOPE">outline only</a>
            </body></html>
        "#;
        let crawler = ProductCrawler::new(Arc::new(FakeFetcher(html.to_string())));
        let urls = crawler.find_product_urls("anything").await;

        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_returns_empty() {
        let crawler = ProductCrawler::new(Arc::new(FailingFetcher));
        let urls = crawler.find_product_urls("anything").await;
        assert!(urls.is_empty());
    }
}
