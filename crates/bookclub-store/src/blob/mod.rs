//! # Blob Stores
//!
//! The persistence substrate: a key → string store with two operations.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         BlobStore                                       │
//! │                                                                         │
//! │   get(key)        → Ok(Some(blob)) | Ok(None) when never written        │
//! │   set(key, blob)  → replaces the whole blob                             │
//! │                                                                         │
//! │   ┌────────────────┐   ┌────────────────┐   ┌────────────────────────┐ │
//! │   │ MemoryBlobStore│   │ FileBlobStore  │   │ SqliteBlobStore        │ │
//! │   │ HashMap        │   │ <dir>/<key>.json│  │ blobs table (sqlx)     │ │
//! │   │ tests, scratch │   │ atomic rename  │   │ WAL, migrations        │ │
//! │   └────────────────┘   └────────────────┘   └────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends report failures as [`StoreError`](crate::StoreError). Whether a
//! failure matters is the caller's call; `BookListStore` only logs them.

pub mod file;
pub mod memory;
pub mod sqlite;

use std::future::Future;

use crate::error::StoreResult;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use sqlite::{SqliteBlobStore, SqliteConfig};

/// A scoped key → blob store.
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Replaces the blob stored under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Short backend name for log lines.
    fn backend_name(&self) -> &'static str;
}
