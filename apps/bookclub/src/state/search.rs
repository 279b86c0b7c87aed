//! # Search State
//!
//! The search dropdown: the latest results and whether they are showing.
//!
//! ## Dropdown Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  search <q> ──► (spawned) catalog lookup ──► show(query, results)      │
//! │                                                   │                     │
//! │            another search finishing later ────────┤ overwrites          │
//! │                                                   ▼                     │
//! │                                        ┌────────────────────┐          │
//! │                                        │ visible dropdown   │          │
//! │                                        └─────────┬──────────┘          │
//! │                                                  │                      │
//! │             add <result-id> ─────────────────────┤                      │
//! │             close ───────────────────────────────┴──► hide()           │
//! │                                                                         │
//! │  NOTE: No cancellation. Whichever lookup finishes last is shown.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use bookclub_core::SearchCandidate;
use serde::Serialize;

/// What the dropdown currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SearchCandidate>,
    pub visible: bool,
}

impl SearchResults {
    pub fn find(&self, id: &str) -> Option<&SearchCandidate> {
        self.results.iter().find(|c| c.id == id)
    }
}

#[derive(Clone, Default)]
pub struct SearchState {
    results: Arc<Mutex<SearchResults>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the results.
    pub fn with_results<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SearchResults) -> R,
    {
        let results = self.results.lock().expect("Search results mutex poisoned");
        f(&results)
    }

    /// Executes a function with write access to the results.
    pub fn with_results_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SearchResults) -> R,
    {
        let mut results = self.results.lock().expect("Search results mutex poisoned");
        f(&mut results)
    }

    /// Replaces the displayed results and opens the dropdown.
    pub fn show(&self, query: impl Into<String>, results: Vec<SearchCandidate>) {
        let query = query.into();
        self.with_results_mut(|state| {
            state.query = query;
            state.results = results;
            state.visible = true;
        });
    }

    /// Closes the dropdown. The last results are kept.
    pub fn hide(&self) {
        self.with_results_mut(|state| state.visible = false);
    }

    pub fn snapshot(&self) -> SearchResults {
        self.with_results(SearchResults::clone)
    }

    pub fn is_visible(&self) -> bool {
        self.with_results(|state| state.visible)
    }
}
