//! Database connection pool management.
//!
//! Initializes the SQLite pool backing durable local storage with WAL mode
//! enabled and automatic database file creation.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::sync::Arc;

use log::{error, info};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::StorageError;

/// Initializes and returns a database connection pool for the given path.
///
/// Creates the database file if it doesn't exist and enables WAL mode for
/// better concurrent access.
pub async fn init_db_pool_with_path(
    db_path: &std::path::Path,
) -> Result<Arc<Pool<Sqlite>>, StorageError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => info!("Database file created successfully."),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Database file already exists.")
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(StorageError::FileCreationError(e.to_string()));
        }
    }

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path_str))
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            StorageError::SqlError(e)
        })?;

    // Enable WAL mode
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            StorageError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}
