//! Typed settings storage.
//!
//! The console keeps two kinds of state between runs: the column visibility
//! of each table and, per user, the list of recently opened opportunities.

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use chapter_table::VisibilityState;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// How many recently viewed opportunities are remembered.
pub const RECENTLY_VIEWED_LIMIT: usize = 10;

const VISIBILITY_PREFIX: &str = "visibility/";
const RECENTLY_VIEWED_PREFIX: &str = "recently-viewed/";

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Typed settings provider.
///
/// Wraps a `SettingsBackend` with typed serialization via bincode.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Provider over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.load(key).await? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map(Some)
                .map_err(SettingsError::Deserialization),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.store(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }

    // =========================================================================
    // Column visibility
    // =========================================================================

    /// Stored visibility of a table, if the user ever changed it.
    pub async fn visibility(&self, table: &str) -> Result<Option<VisibilityState>, SettingsError> {
        self.get(&format!("{VISIBILITY_PREFIX}{table}")).await
    }

    pub async fn save_visibility(
        &self,
        table: &str,
        state: &VisibilityState,
    ) -> Result<(), SettingsError> {
        debug!("Saving column visibility for {table}");
        self.set(&format!("{VISIBILITY_PREFIX}{table}"), state).await
    }

    /// Forgets the stored visibility so the table's defaults apply again.
    pub async fn clear_visibility(&self, table: &str) -> Result<(), SettingsError> {
        debug!("Clearing column visibility for {table}");
        self.delete(&format!("{VISIBILITY_PREFIX}{table}")).await
    }

    // =========================================================================
    // Recently viewed opportunities
    // =========================================================================

    /// Opportunity ids a user opened, most recent first.
    pub async fn recently_viewed(&self, user: &str) -> Result<Vec<String>, SettingsError> {
        Ok(self
            .get(&format!("{RECENTLY_VIEWED_PREFIX}{user}"))
            .await?
            .unwrap_or_default())
    }

    /// Moves an id to the front of a user's recently viewed list.
    pub async fn push_recently_viewed(&self, user: &str, id: &str) -> Result<Vec<String>, SettingsError> {
        let mut ids = self.recently_viewed(user).await?;
        ids.retain(|existing| existing != id);
        ids.insert(0, id.to_string());
        ids.truncate(RECENTLY_VIEWED_LIMIT);
        self.set(&format!("{RECENTLY_VIEWED_PREFIX}{user}"), &ids).await?;
        Ok(ids)
    }
}
