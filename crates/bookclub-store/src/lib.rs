//! # bookclub-store: Persistence Layer for Stormy Book Club
//!
//! Owns the reading list at runtime and persists it through a pluggable
//! key → blob store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           bookclub-store                                │
//! │                                                                         │
//! │   ┌──────────────────────────────────────────────────────────────┐     │
//! │   │ BookListStore<S: BlobStore>                                  │     │
//! │   │   books: BookList   current_filter: Filter                   │     │
//! │   └───────────┬──────────────────────────────────┬───────────────┘     │
//! │               │ persist (whole list, JSON)       │ render              │
//! │               ▼                                  ▼                     │
//! │   ┌───────────────────────┐          ┌──────────────────────┐         │
//! │   │ BlobStore             │          │ RenderEmitter        │         │
//! │   │  Memory / File / SQLite│         │  NoOpEmitter / UI    │         │
//! │   └───────────────────────┘          └──────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use bookclub_store::{BookListStore, SqliteBlobStore, SqliteConfig, StoreOptions};
//!
//! let blob = SqliteBlobStore::connect(SqliteConfig::new("./bookclub.db")).await?;
//! let mut store = BookListStore::new(blob, StoreOptions::default());
//! store.load().await;
//! store.add(&candidate).await;
//! ```

pub mod blob;
pub mod emitter;
pub mod error;
pub mod migrations;
pub mod store;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, SqliteBlobStore, SqliteConfig};
pub use emitter::{NoOpEmitter, RenderEmitter};
pub use error::{StoreError, StoreResult};
pub use store::{BookListStore, StoreOptions};
