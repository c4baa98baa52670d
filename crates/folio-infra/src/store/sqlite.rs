//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `folio-core` using sqlx with split
//! read/write pools. Each slot is one row of the `session_kv` table.

use chrono::Utc;
use folio_core::storage::session_store::SessionStore;
use folio_types::error::StoreError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl SessionStore for SqliteSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM session_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO session_kv (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (SqliteSessionStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("kv.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (SqliteSessionStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (store, _dir) = test_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_and_overwrite() {
        let (store, _dir) = test_store().await;

        store.set("portfolio_session_id", "first").await.unwrap();
        assert_eq!(
            store.get("portfolio_session_id").await.unwrap().as_deref(),
            Some("first")
        );

        store.set("portfolio_session_id", "second").await.unwrap();
        assert_eq!(
            store.get("portfolio_session_id").await.unwrap().as_deref(),
            Some("second")
        );

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM session_kv")
            .fetch_one(&store.pool.reader)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_created_at() {
        let (store, _dir) = test_store().await;
        store.set("k", "v1").await.unwrap();
        let (created_before,): (String,) =
            sqlx::query_as("SELECT created_at FROM session_kv WHERE key = 'k'")
                .fetch_one(&store.pool.reader)
                .await
                .unwrap();

        store.set("k", "v2").await.unwrap();
        let (created_after,): (String,) =
            sqlx::query_as("SELECT created_at FROM session_kv WHERE key = 'k'")
                .fetch_one(&store.pool.reader)
                .await
                .unwrap();
        assert_eq!(created_before, created_after);
    }
}
