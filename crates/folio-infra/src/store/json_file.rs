//! JSON-file session store.
//!
//! Keeps all slots in a single flat JSON object (`{"key": "value", ...}`),
//! the terminal counterpart of browser localStorage. Writes go to a
//! sibling temp file first and are renamed into place.

use std::path::{Path, PathBuf};

use folio_core::storage::session_store::SessionStore;
use folio_types::error::StoreError;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// File-backed implementation of `SessionStore`.
#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole object. A missing file is an empty store.
    async fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::Corrupt(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Corrupt(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

impl SessionStore for JsonFileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.load().await?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        // A corrupt file is replaced rather than blocking the new value.
        let mut map = match self.load().await {
            Ok(map) => map,
            Err(StoreError::Corrupt(reason)) => {
                warn!(reason = %reason, "Overwriting corrupt session file");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map).await?;
        debug!(path = %self.path.display(), key, "Session store updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));
        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));

        store.set("portfolio_session_id", "abc").await.unwrap();
        assert_eq!(
            store.get("portfolio_session_id").await.unwrap().as_deref(),
            Some("abc")
        );

        store.set("portfolio_session_id", "def").await.unwrap();
        assert_eq!(
            store.get("portfolio_session_id").await.unwrap().as_deref(),
            Some("def")
        );
    }

    #[tokio::test]
    async fn test_other_keys_preserved() {
        let dir = tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));

        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("session.json");
        let store = JsonFileSessionStore::new(path.clone());

        store.set("k", "v").await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_error_and_set_recovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "this is not { json").await.unwrap();
        let store = JsonFileSessionStore::new(path);

        assert!(matches!(
            store.get("k").await,
            Err(StoreError::Corrupt(_))
        ));

        store.set("k", "fresh").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_non_string_value_reads_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, r#"{"k": 42}"#).await.unwrap();
        let store = JsonFileSessionStore::new(path);

        assert!(store.get("k").await.unwrap().is_none());
    }
}
