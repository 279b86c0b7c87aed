//! # Storage State
//!
//! Opens whichever blob store the configuration names and exposes it as one
//! concrete [`BlobStore`].
//!
//! ```text
//! [storage] backend = ...
//!      │
//!      ├── "sqlite" ──► SqliteBlobStore::connect(<path or data dir>/bookclub.db)
//!      ├── "file"   ──► FileBlobStore::new(<path or data dir>)
//!      └── "memory" ──► MemoryBlobStore::new()   (nothing survives exit)
//! ```

use bookclub_store::{
    BlobStore, FileBlobStore, MemoryBlobStore, SqliteBlobStore, SqliteConfig, StoreResult,
};
use tracing::info;

use crate::config::{BackendKind, StorageConfig};
use crate::error::{ApiError, ConfigError};

/// The configured blob store.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Memory(MemoryBlobStore),
    File(FileBlobStore),
    Sqlite(SqliteBlobStore),
}

impl StorageBackend {
    /// Opens the backend described by `config`.
    ///
    /// ## Returns
    /// * `Err(ApiError)` - no data directory could be determined, or the
    ///   SQLite database could not be opened / migrated
    pub async fn open(config: &StorageConfig) -> Result<Self, ApiError> {
        let backend = match config.backend {
            BackendKind::Memory => StorageBackend::Memory(MemoryBlobStore::new()),
            BackendKind::File => {
                let dir = config.resolved_path().ok_or_else(|| no_data_path(config))?;
                info!(dir = %dir.display(), "Using JSON file storage");
                StorageBackend::File(FileBlobStore::new(dir))
            }
            BackendKind::Sqlite => {
                let path = config.resolved_path().ok_or_else(|| no_data_path(config))?;
                let store = SqliteBlobStore::connect(SqliteConfig::new(path)).await?;
                StorageBackend::Sqlite(store)
            }
        };

        info!(backend = backend.backend_name(), key = %config.key, "Storage opened");
        Ok(backend)
    }

    /// Releases the SQLite pool, if any.
    pub async fn close(&self) {
        if let StorageBackend::Sqlite(store) = self {
            store.close().await;
        }
    }
}

fn no_data_path(config: &StorageConfig) -> ApiError {
    ConfigError::NoDataPath {
        backend: config.backend.to_string(),
    }
    .into()
}

impl BlobStore for StorageBackend {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            StorageBackend::Memory(store) => store.get(key).await,
            StorageBackend::File(store) => store.get(key).await,
            StorageBackend::Sqlite(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            StorageBackend::Memory(store) => store.set(key, value).await,
            StorageBackend::File(store) => store.set(key, value).await,
            StorageBackend::Sqlite(store) => store.set(key, value).await,
        }
    }

    fn backend_name(&self) -> &'static str {
        match self {
            StorageBackend::Memory(store) => store.backend_name(),
            StorageBackend::File(store) => store.backend_name(),
            StorageBackend::Sqlite(store) => store.backend_name(),
        }
    }
}
