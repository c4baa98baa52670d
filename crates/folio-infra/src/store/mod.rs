//! Session store implementations.
//!
//! `ConfiguredStore` dispatches to whichever backend the configuration
//! selects, since the RPITIT `SessionStore` trait is not object safe.

pub mod json_file;
pub mod pool;
pub mod sqlite;

use std::path::Path;

use folio_core::storage::memory::MemorySessionStore;
use folio_core::storage::session_store::SessionStore;
use folio_types::config::StoreKind;
use folio_types::error::StoreError;

use crate::paths;

use self::json_file::JsonFileSessionStore;
use self::pool::DatabasePool;
use self::sqlite::SqliteSessionStore;

/// The session store selected by `StoreKind`.
pub enum ConfiguredStore {
    File(JsonFileSessionStore),
    Sqlite(SqliteSessionStore),
    Memory(MemorySessionStore),
}

impl ConfiguredStore {
    /// Open the backend for `kind` under `data_dir`, creating files as needed.
    pub async fn open(kind: StoreKind, data_dir: &Path) -> Result<Self, StoreError> {
        match kind {
            StoreKind::File => Ok(Self::File(JsonFileSessionStore::new(
                paths::session_file_path(data_dir),
            ))),
            StoreKind::Sqlite => {
                tokio::fs::create_dir_all(data_dir).await?;
                let url = paths::database_url(data_dir);
                let pool = DatabasePool::new(&url)
                    .await
                    .map_err(|e| StoreError::Io(e.to_string()))?;
                Ok(Self::Sqlite(SqliteSessionStore::new(pool)))
            }
            StoreKind::Memory => Ok(Self::Memory(MemorySessionStore::new())),
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            Self::File(_) => StoreKind::File,
            Self::Sqlite(_) => StoreKind::Sqlite,
            Self::Memory(_) => StoreKind::Memory,
        }
    }
}

impl SessionStore for ConfiguredStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::File(store) => store.get(key).await,
            Self::Sqlite(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.set(key, value).await,
            Self::Sqlite(store) => store.set(key, value).await,
            Self::Memory(store) => store.set(key, value).await,
        }
    }
}
