//! SQLite settings backend with in-memory cache.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use log::trace;

use super::SettingsBackend;
use super::SettingsError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS console_settings (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    updated_at INTEGER NOT NULL
)";
const SELECT_VALUE: &str = "SELECT value FROM console_settings WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO console_settings (key, value, updated_at) VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE: &str = "DELETE FROM console_settings WHERE key = ?1";

/// Settings stored in one SQLite table; reads are served from a DashMap once
/// a key has been seen.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Opens (or creates) the settings database at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Opening settings database at {}", path.as_ref().display());
        let client = ClientBuilder::new().path(path).open().await?;
        Self::with_client(client).await
    }

    /// A private, non-persistent database.
    pub async fn in_memory() -> Result<Self, SettingsError> {
        let client = ClientBuilder::new().open().await?;
        Self::with_client(client).await
    }

    async fn with_client(client: Client) -> Result<Self, SettingsError> {
        client.conn(|conn| conn.execute(CREATE_TABLE, [])).await?;
        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let lookup = key.to_string();
        let stored: Option<Vec<u8>> = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(SELECT_VALUE)?;
                let mut rows = stmt.query([&lookup])?;
                rows.next()?.map(|row| row.get(0)).transpose()
            })
            .await?;
        trace!("Settings miss for {key}, found in db: {}", stored.is_some());

        if let Some(value) = &stored {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(stored)
    }

    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let row_key = key.to_string();
        let row_value = value.clone();
        let updated_at = chrono::Utc::now().timestamp();

        self.client
            .conn(move |conn| {
                conn.execute(
                    UPSERT_VALUE,
                    rusqlite::params![row_key, row_value, updated_at],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let row_key = key.to_string();
        self.client
            .conn(move |conn| conn.execute(DELETE_VALUE, [&row_key]))
            .await?;
        self.cache.remove(key);
        Ok(())
    }
}
