//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::kv::{KeyValueStore, StorageResult};

/// Volatile store used for tests and for session-only state. Clones share
/// the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys. Test convenience.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| crate::error_handling::StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| crate::error_handling::StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| crate::error_handling::StorageError::Unavailable(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
