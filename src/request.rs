//! Search request representation.

use serde::{Deserialize, Serialize};

use crate::{Result, ScrapeError};

/// Maximum accepted keyword length, in characters.
pub const MAX_KEYWORDS_LEN: usize = 200;

/// Maximum number of product records a single request may ask for.
pub const MAX_RESULTS: u32 = 50;

/// A product search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text search keywords.
    pub keywords: String,
    /// Number of product records to return, 1 to 50.
    pub num_results: u32,
}

impl SearchRequest {
    /// Creates a new search request.
    pub fn new(keywords: impl Into<String>, num_results: u32) -> Self {
        Self {
            keywords: keywords.into(),
            num_results,
        }
    }

    /// Checks the request shape.
    pub fn validate(&self) -> Result<()> {
        let keywords = self.keywords.trim();
        if keywords.is_empty() {
            return Err(ScrapeError::InvalidRequest(
                "Keywords cannot be empty".into(),
            ));
        }
        if keywords.chars().count() > MAX_KEYWORDS_LEN {
            return Err(ScrapeError::InvalidRequest(format!(
                "Keywords cannot exceed {} characters",
                MAX_KEYWORDS_LEN
            )));
        }
        if self.num_results < 1 || self.num_results > MAX_RESULTS {
            return Err(ScrapeError::InvalidRequest(format!(
                "numResults must be between 1 and {}",
                MAX_RESULTS
            )));
        }
        Ok(())
    }
}
