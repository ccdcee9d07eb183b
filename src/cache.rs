//! Result caching with per-entry TTL.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::product::ProductRecord;

/// Store for memoized search results.
///
/// Implementations absorb their own failures: a faulty backend behaves as
/// a miss and must never surface an error to the search pipeline.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Returns the records cached under `key`, if present and unexpired.
    async fn get(&self, key: &str) -> Option<Vec<ProductRecord>>;

    /// Stores `records` under `key` for `ttl`.
    async fn set_with_ttl(&self, key: &str, records: Vec<ProductRecord>, ttl: Duration);
}

struct CacheEntry {
    records: Vec<ProductRecord>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// In-process result cache.
///
/// Expired entries are not proactively evicted; expiry is checked lazily
/// on read, and a later write for the same key replaces the entry.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<ProductRecord>> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.records.clone())
    }

    async fn set_with_ttl(&self, key: &str, records: Vec<ProductRecord>, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                records,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> ProductRecord {
        let mut record = ProductRecord::new("https://www.amazon.com/dp/X");
        record.title = title.to_string();
        record
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = MemoryCache::new();
        assert!(cache.get("lincoln:5").await.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        let records = vec![record("The Trial")];
        cache
            .set_with_ttl("lincoln:5", records.clone(), Duration::from_secs(60))
            .await;

        assert_eq!(cache.get("lincoln:5").await, Some(records));
    }

    #[tokio::test]
    async fn test_keys_are_distinct() {
        let cache = MemoryCache::new();
        cache
            .set_with_ttl("lincoln:5", vec![record("A")], Duration::from_secs(60))
            .await;

        assert!(cache.get("lincoln:10").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_miss() {
        let cache = MemoryCache::new();
        cache
            .set_with_ttl("lincoln:5", vec![record("A")], Duration::ZERO)
            .await;

        assert!(cache.get("lincoln:5").await.is_none());
    }

    #[tokio::test]
    async fn test_entry_survives_within_ttl() {
        let cache = MemoryCache::new();
        cache
            .set_with_ttl("lincoln:5", vec![record("A")], Duration::from_secs(3600))
            .await;

        assert!(cache.get("lincoln:5").await.is_some());
    }

    #[tokio::test]
    async fn test_set_replaces_previous_entry() {
        let cache = MemoryCache::new();
        cache
            .set_with_ttl("lincoln:5", vec![record("Old")], Duration::from_secs(60))
            .await;
        cache
            .set_with_ttl("lincoln:5", vec![record("New")], Duration::from_secs(60))
            .await;

        let cached = cache.get("lincoln:5").await.unwrap();
        assert_eq!(cached[0].title, "New");
    }

    #[tokio::test]
    async fn test_rewrite_revives_expired_key() {
        let cache = MemoryCache::new();
        cache
            .set_with_ttl("lincoln:5", vec![record("Old")], Duration::ZERO)
            .await;
        assert!(cache.get("lincoln:5").await.is_none());

        cache
            .set_with_ttl("lincoln:5", vec![record("New")], Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("lincoln:5").await.unwrap()[0].title, "New");
    }
}
