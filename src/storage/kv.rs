//! The key-value abstraction over durable local storage.
//!
//! The quota tracker, history store, and cookie-consent flag all read and
//! write through [`KeyValueStore`] so the backend is swappable: SQLite for
//! the real application, an in-memory map for tests and session-only data.
//! Reads and writes are read/modify/write without transactions; there is a
//! single writer in the intended usage model, so last-writer-wins.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::error_handling::StorageError;
use crate::storage::migrations::run_migrations;
use crate::storage::pool::init_db_pool_with_path;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal persistent map: string keys to string payloads.
///
/// Callers serialize their records to JSON before storing. Implementations
/// must treat an absent key and a removed key identically.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the payload stored under `key`, if any.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous payload.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key` entirely. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Durable store backed by the SQLite `kv_store` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteStore {
    /// Wraps an already-initialized pool. Assumes migrations have run.
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `path` and runs
    /// migrations.
    pub async fn open(path: &Path) -> StorageResult<Self> {
        let pool = init_db_pool_with_path(path).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// The underlying pool, for callers that need raw queries.
    pub fn pool(&self) -> &Arc<Pool<Sqlite>> {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
                .bind(key)
                .fetch_optional(self.pool.as_ref())
                .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(self.pool.as_ref())
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
