//! SQLite store backend.
//!
//! The whole table is read into memory when the file is opened; after that
//! reads are served from memory and writes go through to disk before the
//! in-memory copy changes.

use std::path::Path;

use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use dashmap::DashMap;
use rusqlite::params;

use super::{StoreBackend, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS form_store (
    key TEXT PRIMARY KEY NOT NULL,
    json TEXT NOT NULL,
    written_at TEXT NOT NULL
)";

const UPSERT: &str = "INSERT INTO form_store (key, json, written_at)
    VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    ON CONFLICT(key) DO UPDATE
    SET json = excluded.json, written_at = excluded.written_at";

/// Form data kept in a single SQLite file.
pub struct SqliteBackend {
    client: Client,
    entries: DashMap<String, String>,
}

impl SqliteBackend {
    /// Open (or create) the database at `path` and load its entries.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let client = ClientBuilder::new().path(path).open().await?;

        let rows = client
            .conn(|conn| {
                conn.execute(SCHEMA, [])?;
                let mut stmt = conn.prepare("SELECT key, json FROM form_store")?;
                let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
                rows.collect::<Result<Vec<(String, String)>, _>>()
            })
            .await?;

        log::debug!("[store] loaded {} entries", rows.len());
        Ok(Self {
            client,
            entries: rows.into_iter().collect(),
        })
    }
}

#[async_trait]
impl StoreBackend for SqliteBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|json| json.clone()))
    }

    async fn save(&self, key: &str, json: String) -> Result<(), StoreError> {
        let (k, j) = (key.to_string(), json.clone());
        self.client
            .conn(move |conn| conn.execute(UPSERT, params![k, j]))
            .await?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let k = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM form_store WHERE key = ?1", [k]))
            .await?;
        self.entries.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}
