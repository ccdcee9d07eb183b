//! Product persistence keyed by ISBN.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::product::ProductRecord;
use crate::Result;

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The record's ISBN was not present before.
    Inserted,
    /// An existing record with the same ISBN was replaced.
    Updated,
}

/// Write-side seam for persisting scraped records.
///
/// Records are keyed by ISBN; upserting a record whose ISBN is already
/// present replaces the stored record wholesale.
pub trait ProductStore {
    /// Inserts or replaces the record under its ISBN.
    fn upsert(&mut self, record: &ProductRecord) -> Result<UpsertOutcome>;
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, ProductRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by ISBN.
    pub fn get(&self, isbn: &str) -> Option<&ProductRecord> {
        self.records.get(isbn)
    }
}

impl ProductStore for MemoryStore {
    fn upsert(&mut self, record: &ProductRecord) -> Result<UpsertOutcome> {
        let isbn = record.isbn.clone().unwrap_or_default();
        match self.records.insert(isbn, record.clone()) {
            Some(_) => Ok(UpsertOutcome::Updated),
            None => Ok(UpsertOutcome::Inserted),
        }
    }
}

/// SQLite-backed store. Records are stored as JSON documents under their
/// ISBN so the schema does not chase the record shape.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        Self::initialize(conn)
    }

    /// Opens an in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS products (
                isbn TEXT PRIMARY KEY,
                doc  TEXT NOT NULL
            );
        ",
        )?;
        Ok(Self { conn })
    }

    /// Looks up a record by ISBN.
    pub fn get(&self, isbn: &str) -> Result<Option<ProductRecord>> {
        let doc: Option<String> = self
            .conn
            .query_row(
                "SELECT doc FROM products WHERE isbn = ?1",
                params![isbn],
                |row| row.get(0),
            )
            .optional()?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl ProductStore for SqliteStore {
    fn upsert(&mut self, record: &ProductRecord) -> Result<UpsertOutcome> {
        let isbn = record.isbn.clone().unwrap_or_default();
        let doc = serde_json::to_string(record)?;

        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM products WHERE isbn = ?1)",
            params![isbn],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO products (isbn, doc) VALUES (?1, ?2)
             ON CONFLICT(isbn) DO UPDATE SET doc = excluded.doc",
            params![isbn, doc],
        )?;

        Ok(if exists {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(isbn: &str, title: &str) -> ProductRecord {
        let mut record = ProductRecord::new(format!("https://www.amazon.com/dp/{}", isbn));
        record.isbn = Some(isbn.to_string());
        record.title = title.to_string();
        record
    }

    #[test]
    fn test_memory_store_insert_then_update() {
        let mut store = MemoryStore::new();

        let outcome = store.upsert(&record("0813126088", "First Title")).unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(store.len(), 1);

        let outcome = store.upsert(&record("0813126088", "Second Title")).unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("0813126088").unwrap().title, "Second Title");
    }

    #[test]
    fn test_memory_store_distinct_isbns() {
        let mut store = MemoryStore::new();
        store.upsert(&record("1111111111", "One")).unwrap();
        store.upsert(&record("2222222222", "Two")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sqlite_store_insert_then_update() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let outcome = store.upsert(&record("0813126088", "First Title")).unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let outcome = store.upsert(&record("0813126088", "Second Title")).unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);

        assert_eq!(store.len().unwrap(), 1);
        let stored = store.get("0813126088").unwrap().unwrap();
        assert_eq!(stored.title, "Second Title");
    }

    #[test]
    fn test_sqlite_store_round_trips_full_record() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let mut original = record("0813126088", "The Trial");
        original.authors = vec!["Edward Steers, Jr.".to_string()];
        original.price = "$24.95".to_string();
        original.rating = Some(4.5);
        original.review_count = Some(120);

        store.upsert(&original).unwrap();
        let stored = store.get("0813126088").unwrap().unwrap();
        assert_eq!(stored, original);
    }

    #[test]
    fn test_sqlite_store_get_missing_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("0000000000").unwrap().is_none());
    }
}
