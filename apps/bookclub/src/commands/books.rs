//! # Book Commands
//!
//! Handlers for everything the reading list view can do.
//!
//! ## Action → Store Operation
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────┐
//! │ Action               │ Store call                                   │
//! ├──────────────────────┼──────────────────────────────────────────────┤
//! │ filter button        │ set_filter(filter)                           │
//! │ Complete / Reading   │ update_status(id, completed | reading)       │
//! │ star click           │ update_rating(id, 1..=5)  (0 clears)         │
//! │ icon toggle          │ update_icon(id, frog | elephant)             │
//! │ Archive / Unarchive  │ set_archived(id, true | false)               │
//! │ Delete (confirmed)   │ delete(id)                                   │
//! │ ↑ / ↓                │ move_adjacent(view index, up | down)         │
//! │ drag and drop        │ reorder(ids)                                 │
//! └──────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Handlers validate their input and then defer to the store. A mutation
//! aimed at an id that isn't on the list is not an error: it returns
//! `Ok(false)` and nothing changes.

use bookclub_core::validation::{validate_book_id, validate_rating};
use bookclub_core::{Book, Filter, IconType, MoveDirection, ReadingStatus};
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ErrorCode};
use crate::state::{Library, LibraryState};

/// The active filter and the books it shows, in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub filter: Filter,
    pub books: Vec<Book>,
    /// Size of the whole list, archived books included.
    pub total: usize,
}

impl BookView {
    fn from_library(library: &Library) -> Self {
        BookView {
            filter: library.current_filter(),
            books: library.filtered_view().into_iter().cloned().collect(),
            total: library.books().len(),
        }
    }
}

pub async fn get_view(library: &LibraryState) -> BookView {
    debug!("get_view command");
    BookView::from_library(&*library.lock().await)
}

pub async fn set_filter(library: &LibraryState, filter: &str) -> Result<BookView, ApiError> {
    let filter: Filter = filter.parse()?;
    debug!(%filter, "set_filter command");

    let mut library = library.lock().await;
    library.set_filter(filter);
    Ok(BookView::from_library(&library))
}

pub async fn set_status(
    library: &LibraryState,
    id: &str,
    status: ReadingStatus,
) -> Result<bool, ApiError> {
    let id = validate_book_id(id)?;
    debug!(id, %status, "set_status command");
    Ok(library.lock().await.update_status(id, status).await)
}

/// Sets the star rating. Stars are 1 to 5; 0 clears the rating.
pub async fn set_rating(library: &LibraryState, id: &str, rating: i64) -> Result<bool, ApiError> {
    let id = validate_book_id(id)?;
    let rating = validate_rating(rating)?;
    debug!(id, rating, "set_rating command");
    Ok(library.lock().await.update_rating(id, rating).await)
}

pub async fn set_icon(library: &LibraryState, id: &str, icon: IconType) -> Result<bool, ApiError> {
    let id = validate_book_id(id)?;
    debug!(id, %icon, "set_icon command");
    Ok(library.lock().await.update_icon(id, icon).await)
}

pub async fn archive(library: &LibraryState, id: &str) -> Result<bool, ApiError> {
    let id = validate_book_id(id)?;
    Ok(library.lock().await.set_archived(id, true).await)
}

pub async fn unarchive(library: &LibraryState, id: &str) -> Result<bool, ApiError> {
    let id = validate_book_id(id)?;
    Ok(library.lock().await.set_archived(id, false).await)
}

/// Deletes every entry with `id`.
///
/// The caller must have asked the user first; an unconfirmed delete is
/// refused without touching the list.
pub async fn delete_book(library: &LibraryState, id: &str, confirmed: bool) -> Result<bool, ApiError> {
    let id = validate_book_id(id)?;
    if !confirmed {
        return Err(ApiError::new(
            ErrorCode::ConfirmationRequired,
            "Are you sure you want to delete this book?",
        ));
    }
    debug!(id, "delete_book command");
    Ok(library.lock().await.delete(id).await)
}

/// Moves the book at `index` of the current view one place up or down.
pub async fn move_book(
    library: &LibraryState,
    index: usize,
    direction: MoveDirection,
) -> Result<bool, ApiError> {
    debug!(index, ?direction, "move_book command");
    Ok(library.lock().await.move_adjacent(index, direction).await)
}

/// Replaces the list order with `ids`. Books left out are dropped.
pub async fn reorder_books(library: &LibraryState, ids: &[String]) -> Result<(), ApiError> {
    let ids = ids
        .iter()
        .map(|id| validate_book_id(id))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = ids.len(), "reorder_books command");
    library.lock().await.reorder(ids.as_slice()).await;
    Ok(())
}
