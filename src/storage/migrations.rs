//! Database schema migrations.

use sqlx::{Pool, Sqlite};

use crate::error_handling::StorageError;

/// Creates the schema if it does not exist yet.
///
/// Durable local storage is a single key-value table; keys are the
/// namespaced record names from [`crate::config`].
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), StorageError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
