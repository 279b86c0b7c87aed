//! # Book List Store
//!
//! The single authority over the reading list at runtime.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  caller ──► BookListStore::update_status("v1", Completed)              │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │            BookList (bookclub-core) ── id not found? ──► return false   │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │            persist(): serialize whole list ──► BlobStore::set(key, ..)  │
//! │                   │            (failure → tracing::warn!, kept in RAM)  │
//! │                   ▼                                                     │
//! │            render(): RenderEmitter::emit_render(filter, view)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Which Operations Persist / Render
//! ```text
//! ┌──────────────────┬──────────┬──────────┐
//! │ Operation        │ Persist  │ Render   │
//! ├──────────────────┼──────────┼──────────┤
//! │ add              │ yes      │ yes      │
//! │ update_* / arch. │ if found │ if found │
//! │ delete           │ always   │ always   │
//! │ reorder          │ yes      │ no       │
//! │ move_adjacent    │ if moved │ if moved │
//! │ set_filter       │ no       │ yes      │
//! └──────────────────┴──────────┴──────────┘
//! ```

use std::sync::Arc;

use bookclub_core::{
    Book, BookList, Filter, IconType, MoveDirection, ReadingStatus, SearchCandidate,
    DEFAULT_COVER_URL, DEFAULT_STORAGE_KEY,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::blob::BlobStore;
use crate::emitter::{NoOpEmitter, RenderEmitter};
use crate::error::StoreResult;

// =============================================================================
// Options
// =============================================================================

/// Construction parameters for [`BookListStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Blob key the whole collection is stored under.
    pub key: String,

    /// Cover used when a search result has no thumbnail.
    pub placeholder_cover_url: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            key: DEFAULT_STORAGE_KEY.to_string(),
            placeholder_cover_url: DEFAULT_COVER_URL.to_string(),
        }
    }
}

impl StoreOptions {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_placeholder_cover_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_cover_url = url.into();
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Owns the reading list, persists it after each mutation and requests
/// re-renders.
pub struct BookListStore<S> {
    books: BookList,
    current_filter: Filter,
    blob: S,
    options: StoreOptions,
    emitter: Arc<dyn RenderEmitter>,
}

impl<S: BlobStore> BookListStore<S> {
    /// Creates an empty store with no render target. Call [`load`](Self::load)
    /// to read the persisted collection.
    pub fn new(blob: S, options: StoreOptions) -> Self {
        Self::with_emitter(blob, options, Arc::new(NoOpEmitter))
    }

    /// Creates an empty store that reports renders to `emitter`.
    pub fn with_emitter(blob: S, options: StoreOptions, emitter: Arc<dyn RenderEmitter>) -> Self {
        BookListStore {
            books: BookList::new(),
            current_filter: Filter::All,
            blob,
            options,
            emitter,
        }
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Absent, unreadable or unparsable blobs all yield an empty list.
    pub async fn load(&mut self) {
        let key = self.options.key.as_str();
        self.books = match self.blob.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<BookList>(&raw) {
                Ok(list) => {
                    info!(
                        key,
                        count = list.len(),
                        backend = self.blob.backend_name(),
                        "Loaded reading list"
                    );
                    list
                }
                Err(e) => {
                    warn!(key, error = %e, "Stored reading list is not valid JSON; starting empty");
                    BookList::new()
                }
            },
            Ok(None) => {
                debug!(key, "No stored reading list; starting empty");
                BookList::new()
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored reading list; starting empty");
                BookList::new()
            }
        };
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a search result to the end of the list.
    ///
    /// Adding the same result twice creates two entries with the same id.
    pub async fn add(&mut self, candidate: &SearchCandidate) -> Book {
        if self.books.get(&candidate.id).is_some() {
            debug!(id = %candidate.id, "Book already on the list; adding another entry");
        }

        let book = Book::from_candidate(candidate, &self.options.placeholder_cover_url, Utc::now());
        self.books.push(book.clone());
        info!(id = %book.id, title = %book.title, "Book added");

        self.commit().await;
        book
    }

    /// Sets the reading status. The first move to completed stamps the
    /// completion date.
    pub async fn update_status(&mut self, id: &str, status: ReadingStatus) -> bool {
        let found = self.books.update_status(id, status, Utc::now());
        self.commit_if(found, id, "status").await
    }

    pub async fn update_rating(&mut self, id: &str, rating: u8) -> bool {
        let found = self.books.update_rating(id, rating);
        self.commit_if(found, id, "rating").await
    }

    pub async fn update_icon(&mut self, id: &str, icon: IconType) -> bool {
        let found = self.books.update_icon(id, icon);
        self.commit_if(found, id, "icon").await
    }

    pub async fn set_archived(&mut self, id: &str, archived: bool) -> bool {
        let found = self.books.set_archived(id, archived);
        self.commit_if(found, id, "archived").await
    }

    /// Removes every entry with `id`. Persists and renders even when nothing
    /// matched.
    pub async fn delete(&mut self, id: &str) -> bool {
        let removed = self.books.remove(id);
        if removed {
            info!(id, "Book deleted");
        } else {
            debug!(id, "Delete for unknown book");
        }
        self.commit().await;
        removed
    }

    /// Rebuilds the list in the order of `ids`. Books not named are dropped.
    ///
    /// The caller has already rearranged its own view, so no render is
    /// requested.
    pub async fn reorder<I: AsRef<str>>(&mut self, ids: &[I]) {
        let before = self.books.len();
        self.books.reorder(ids);
        debug!(before, after = self.books.len(), "Reading list reordered");
        self.persist().await;
    }

    /// Swaps the book at `filtered_index` of the current view with its
    /// neighbour in `direction`.
    pub async fn move_adjacent(&mut self, filtered_index: usize, direction: MoveDirection) -> bool {
        let moved = self
            .books
            .move_adjacent(self.current_filter, filtered_index, direction);
        if moved {
            debug!(filtered_index, ?direction, filter = %self.current_filter, "Book moved");
            self.commit().await;
        }
        moved
    }

    /// Changes the active filter. Not persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.current_filter = filter;
        self.render();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn filtered_view(&self) -> Vec<&Book> {
        self.books.filtered(self.current_filter)
    }

    pub fn current_filter(&self) -> Filter {
        self.current_filter
    }

    pub fn books(&self) -> &[Book] {
        self.books.books()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn storage_key(&self) -> &str {
        &self.options.key
    }

    pub fn blob_store(&self) -> &S {
        &self.blob
    }

    /// Emits the current filtered view.
    pub fn render(&self) {
        let view = self.filtered_view();
        self.emitter.emit_render(self.current_filter, &view);
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    async fn commit(&mut self) {
        self.persist().await;
        self.render();
    }

    async fn commit_if(&mut self, found: bool, id: &str, field: &'static str) -> bool {
        if found {
            debug!(id, field, "Book updated");
            self.commit().await;
        } else {
            debug!(id, field, "Update for unknown book ignored");
        }
        found
    }

    /// Writes the whole list under the storage key. Failures are logged and
    /// the in-memory list is kept.
    async fn persist(&self) {
        let key = self.options.key.as_str();
        if let Err(e) = self.write_blob(key).await {
            warn!(
                key,
                backend = self.blob.backend_name(),
                error = %e,
                "Failed to persist reading list; keeping changes in memory"
            );
        }
    }

    async fn write_blob(&self, key: &str) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.books)?;
        self.blob.set(key, &raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
