//! # State Module
//!
//! Separate state types instead of one `AppState`, so each command takes
//! only what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  LibraryState    │  │  SearchState     │  │  StorageBackend      │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Arc<tokio::     │  │  Arc<Mutex<      │  │  Memory | File |     │  │
//! │  │   Mutex<Book-    │  │   SearchResults  │  │  Sqlite blob store   │  │
//! │  │   ListStore>>    │  │  >>              │  │  (owned by library)  │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LibraryState: async mutex, held across persistence                  │
//! │  • SearchState: std mutex, never held across an await                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod library;
mod search;
mod storage;

pub use library::{Library, LibraryState};
pub use search::{SearchResults, SearchState};
pub use storage::StorageBackend;
