//! # Library State
//!
//! The reading list behind an async mutex.
//!
//! ## Thread Safety
//! Every mutation holds the lock across its persist step, so mutations run
//! one at a time and in arrival order. Catalog searches never take this
//! lock.

use std::sync::Arc;

use bookclub_store::BookListStore;
use tokio::sync::{Mutex, MutexGuard};

use super::StorageBackend;

pub type Library = BookListStore<StorageBackend>;

#[derive(Clone)]
pub struct LibraryState {
    store: Arc<Mutex<Library>>,
}

impl LibraryState {
    /// Wraps a store that has already been loaded.
    pub fn new(store: Library) -> Self {
        LibraryState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Waits for exclusive access to the reading list.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let mut library = state.lock().await;
    /// library.update_rating("v1", 4).await;
    /// ```
    pub async fn lock(&self) -> MutexGuard<'_, Library> {
        self.store.lock().await
    }
}
