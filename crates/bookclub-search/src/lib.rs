//! # bookclub-search: Catalog Search
//!
//! ```text
//! ┌──────────────┐  search("dune", 12)   ┌───────────────────────┐
//! │  app command │ ─────────────────────►│ impl CatalogSearch    │
//! └──────────────┘                       │  GoogleBooksClient    │
//!        ▲                               └──────────┬────────────┘
//!        │ Vec<SearchCandidate>                     │ GET /volumes?q=..
//!        └──────────────────────────────────────────┘
//! ```
//!
//! An empty query returns no candidates without touching the network.

pub mod error;
pub mod google;

use std::future::Future;

use bookclub_core::SearchCandidate;

pub use error::{SearchError, SearchResult};
pub use google::{parse_volumes, GoogleBooksClient, GoogleBooksConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_RESULTS};

/// A remote book catalog.
pub trait CatalogSearch: Send + Sync {
    /// Looks up `query`, returning at most `max_results` candidates.
    fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = SearchResult<Vec<SearchCandidate>>> + Send;
}
