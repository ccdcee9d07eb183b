//! Product record types.

use serde::{Deserialize, Serialize};

/// A single product extracted from a product page.
///
/// Every field except `url` is best-effort: extraction failures leave the
/// field at its absent value (`None`, empty string, or empty list) rather
/// than failing the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// ISBN or ASIN taken from the product URL path.
    pub isbn: Option<String>,
    /// Product title. Empty when the title element is missing.
    pub title: String,
    /// Listed authors, in page order.
    pub authors: Vec<String>,
    /// Product description. May be empty.
    pub description: String,
    /// Canonical source URL, always present.
    pub url: String,
    /// Cover image URL. May be empty.
    pub cover_image_url: String,
    /// Price as displayed on the page, deliberately unparsed.
    pub price: String,
    /// Star rating, 0.0 to 5.0.
    pub rating: Option<f64>,
    /// Number of customer reviews.
    pub review_count: Option<u64>,
}

impl ProductRecord {
    /// Creates an empty record for the given source URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            isbn: None,
            title: String::new(),
            authors: Vec::new(),
            description: String::new(),
            url: url.into(),
            cover_image_url: String::new(),
            price: String::new(),
            rating: None,
            review_count: None,
        }
    }

    /// Whether the record carries enough data to be worth returning.
    ///
    /// A record without a title means extraction found nothing usable on
    /// the page; such records are dropped, never surfaced to callers.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
    }
}
