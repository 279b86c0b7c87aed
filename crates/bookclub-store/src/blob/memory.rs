//! In-memory blob store.
//!
//! Clones share the same map, so a test can keep a handle and inspect what
//! the store wrote.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::BlobStore;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds one blob.
    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut blobs) = store.blobs.lock() {
            blobs.insert(key.into(), value.into());
        }
        store
    }

    /// Current contents under `key`, read synchronously.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.blobs.lock().ok().and_then(|blobs| blobs.get(key).cloned())
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| StoreError::Internal("memory blob store lock poisoned".to_string()))
    }
}

impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = MemoryBlobStore::new();
        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = MemoryBlobStore::with_blob("k", "seed");
        let handle = store.clone();
        store.set("k", "updated").await.unwrap();

        assert_eq!(handle.snapshot("k").as_deref(), Some("updated"));
    }
}
