//! Test support: a store whose every operation fails.
//!
//! Used to verify the degradation paths: quota checks must fail open and
//! history loads must degrade to empty when the backend throws.

use async_trait::async_trait;

use super::kv::{KeyValueStore, StorageResult};
use crate::error_handling::StorageError;

/// A [`KeyValueStore`] that errors on every call, simulating disabled or
/// exhausted browser storage.
#[derive(Clone, Default)]
pub struct FailingStore;

impl FailingStore {
    /// Creates the always-failing store.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("simulated storage outage".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("simulated storage outage".into()))
    }

    async fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("simulated storage outage".into()))
    }
}
