//! # bookclub-core: Pure Reading-List Model
//!
//! This crate is the **heart** of Stormy Book Club. It holds the book record,
//! the filters, and the ordered `BookList` with all of its mutations, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stormy Book Club Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Renderer (terminal / web)                    │   │
//! │  │    Search box ──► Result dropdown ──► Book list ──► Controls    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              bookclub-store (BookListStore)                     │   │
//! │  │       mutate ──► persist whole blob ──► signal re-render        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bookclub-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ book_list │  │   error   │  │ validation│  │   │
//! │  │   │   Book    │  │ BookList  │  │ CoreError │  │  rating   │  │   │
//! │  │   │  Filter   │  │ reorder   │  │           │  │  query    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • NO CLOCK                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, ReadingStatus, IconType, Filter, SearchCandidate)
//! - [`book_list`] - The ordered collection and its mutations
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for the command layer
//!
//! ## Example Usage
//!
//! ```rust
//! use bookclub_core::{Book, BookList, Filter, ReadingStatus, SearchCandidate, DEFAULT_COVER_URL};
//! use chrono::Utc;
//!
//! let mut list = BookList::new();
//! let candidate = SearchCandidate {
//!     id: "B1".to_string(),
//!     title: Some("Dune".to_string()),
//!     authors: Some(vec!["Frank Herbert".to_string()]),
//!     cover_url: None,
//! };
//! list.push(Book::from_candidate(&candidate, DEFAULT_COVER_URL, Utc::now()));
//!
//! assert!(list.update_status("B1", ReadingStatus::Completed, Utc::now()));
//! assert_eq!(list.filtered(Filter::Completed).len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book_list;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use book_list::{BookList, MoveDirection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the reading list has always been saved under.
///
/// Injected into the store through configuration; this is only the default.
pub const DEFAULT_STORAGE_KEY: &str = "stormyBookClub";

/// Cover shown when the catalog has no thumbnail for a volume.
pub const DEFAULT_COVER_URL: &str = "https://via.placeholder.com/150x200?text=No+Cover";

/// Title used when the catalog record has none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Author used when the catalog record has none.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Highest star rating a book can carry. Zero means unrated.
pub const MAX_RATING: u8 = 5;
