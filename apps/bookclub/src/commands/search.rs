//! # Search Commands
//!
//! Catalog lookups and adding results to the list.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search <query>                                                         │
//! │       │                                                                 │
//! │       ├── blank? ──► Skipped (dropdown untouched, no request)           │
//! │       ├── > 100 chars? ──► VALIDATION_ERROR                             │
//! │       ▼                                                                 │
//! │  spawn_search ──► tokio task ──► CatalogSearch::search                  │
//! │       │                               │                                 │
//! │       │ returns at once               ├── Ok  ──► SearchState::show     │
//! │       ▼                               └── Err ──► "Error searching..."  │
//! │  next command runs                                                      │
//! │                                                                         │
//! │  add <result-id> ──► BookListStore::add ──► dropdown hidden             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use bookclub_core::validation::validate_search_query;
use bookclub_core::{Book, SearchCandidate};
use bookclub_search::CatalogSearch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{LibraryState, SearchState};

/// Result of a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query; nothing was requested or shown.
    Skipped,
    /// The dropdown now shows these results (possibly none).
    Shown(Vec<SearchCandidate>),
}

/// Runs one catalog lookup and shows its results.
///
/// On failure the dropdown keeps whatever it showed before.
pub async fn search_catalog<C: CatalogSearch>(
    search: &SearchState,
    catalog: &C,
    query: &str,
    max_results: u32,
) -> Result<SearchOutcome, ApiError> {
    let query = validate_search_query(query)?;
    if query.is_empty() {
        return Ok(SearchOutcome::Skipped);
    }

    debug!(query = %query, "search_catalog command");
    let results = catalog.search(&query, max_results).await?;

    search.show(query, results.clone());
    Ok(SearchOutcome::Shown(results))
}

/// Starts a lookup in the background and hands its outcome to `on_done`.
///
/// Lookups are never cancelled; if several overlap, the one that finishes
/// last decides what the dropdown shows.
pub fn spawn_search<C, F>(
    search: SearchState,
    catalog: Arc<C>,
    query: String,
    max_results: u32,
    on_done: F,
) -> JoinHandle<()>
where
    C: CatalogSearch + 'static,
    F: FnOnce(Result<SearchOutcome, ApiError>) + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = search_catalog(&search, catalog.as_ref(), &query, max_results).await;
        on_done(outcome);
    })
}

/// Adds a result from the open dropdown, then closes the dropdown.
///
/// Once the dropdown is closed its results can no longer be added.
pub async fn add_from_results(
    library: &LibraryState,
    search: &SearchState,
    result_id: &str,
) -> Result<Book, ApiError> {
    let result_id = result_id.trim();
    if !search.is_visible() {
        return Err(ApiError::validation(
            "No search results are open. Search for a book first.",
        ));
    }
    let candidate = search
        .with_results(|state| state.find(result_id).cloned())
        .ok_or_else(|| ApiError::not_found("Search result", result_id))?;

    let book = library.lock().await.add(&candidate).await;
    search.hide();

    info!(id = %book.id, "Added book from search results");
    Ok(book)
}

/// Closes the dropdown without adding anything.
pub fn dismiss_results(search: &SearchState) {
    debug!("dismiss_results command");
    search.hide();
}
