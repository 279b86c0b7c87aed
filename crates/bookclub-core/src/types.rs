//! # Domain Types
//!
//! Core domain types used throughout Stormy Book Club.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ SearchCandidate │──►│      Book       │   │     Filter      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (catalog)   │   │  All            │       │
//! │  │  title?         │   │  title, author  │   │  Reading        │       │
//! │  │  authors?       │   │  status, rating │   │  Completed      │       │
//! │  │  cover_url?     │   │  archived, icon │   │  Archived       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  ReadingStatus  │   │    IconType     │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  Reading        │   │  Frog           │                              │
//! │  │  Completed      │   │  Elephant       │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Archived Is Not a Status
//! `archived` is a separate flag, so an archived book keeps its reading or
//! completed status and gets it back when unarchived.
//!
//! ## Persisted Format
//! Books serialize with camelCase keys (`coverUrl`, `dateAdded`, ...). Every
//! field except `id` has a default, so blobs written before `iconType` and
//! `dateCompleted` existed still load.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::{DEFAULT_COVER_URL, UNKNOWN_AUTHOR, UNKNOWN_TITLE};

// =============================================================================
// Reading Status
// =============================================================================

/// Where the reader is with a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    /// Currently being read. Every new book starts here.
    #[default]
    Reading,
    /// Finished.
    Completed,
}

impl ReadingStatus {
    /// Badge text shown next to the book.
    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::Reading => "Reading",
            ReadingStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingStatus::Reading => write!(f, "reading"),
            ReadingStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for ReadingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reading" => Ok(ReadingStatus::Reading),
            "completed" | "complete" => Ok(ReadingStatus::Completed),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Icon Type
// =============================================================================

/// Cosmetic tag shown beside a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    #[default]
    Frog,
    Elephant,
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconType::Frog => write!(f, "frog"),
            IconType::Elephant => write!(f, "elephant"),
        }
    }
}

impl FromStr for IconType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frog" => Ok(IconType::Frog),
            "elephant" => Ok(IconType::Elephant),
            other => Err(CoreError::UnknownIcon(other.to_string())),
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Named predicate selecting what the list shows.
///
/// ## Predicates
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────┐
/// │ Filter      │ Shows                                        │
/// ├─────────────┼──────────────────────────────────────────────┤
/// │ All         │ every book that is not archived              │
/// │ Reading     │ status = reading   AND not archived          │
/// │ Completed   │ status = completed AND not archived          │
/// │ Archived    │ archived = true, whatever the status         │
/// └─────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Reading,
    Completed,
    Archived,
}

impl Filter {
    /// Returns true if the book belongs in this filter's view.
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Filter::All => !book.archived,
            Filter::Reading => book.status == ReadingStatus::Reading && !book.archived,
            Filter::Completed => book.status == ReadingStatus::Completed && !book.archived,
            Filter::Archived => book.archived,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Reading => write!(f, "reading"),
            Filter::Completed => write!(f, "completed"),
            Filter::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for Filter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "reading" => Ok(Filter::Reading),
            "completed" => Ok(Filter::Completed),
            "archived" => Ok(Filter::Archived),
            other => Err(CoreError::UnknownFilter(other.to_string())),
        }
    }
}

// =============================================================================
// Search Candidate
// =============================================================================

/// One catalog search result, before it is added to the list.
///
/// Fields are optional because the catalog omits them freely. The defaults
/// are applied by [`SearchCandidate::display_title`] and friends, so the
/// result dropdown and the stored book agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SearchCandidate {
    /// Catalog volume identifier.
    pub id: String,

    pub title: Option<String>,

    /// Author names in catalog order.
    pub authors: Option<Vec<String>>,

    /// Thumbnail URL.
    pub cover_url: Option<String>,
}

impl SearchCandidate {
    /// Title, or "Unknown Title" when missing or empty.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => UNKNOWN_TITLE,
        }
    }

    /// Authors joined with ", ", or "Unknown Author" when there are none.
    pub fn display_author(&self) -> String {
        match self.authors.as_deref() {
            Some(authors) if !authors.is_empty() => authors.join(", "),
            _ => UNKNOWN_AUTHOR.to_string(),
        }
    }

    /// Thumbnail URL, or the given placeholder when missing or empty.
    pub fn cover_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.cover_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => placeholder,
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book on the reading list.
///
/// ## Lifecycle
/// ```text
/// SearchCandidate ──► Book::from_candidate ──► status=reading, rating=0,
///                                              archived=false, icon=frog
///        │
///        ▼
/// mutated in place (status / rating / archived / icon / position)
///        │
///        ▼
/// removed by explicit delete
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Catalog identifier. Unique among live records unless the same
    /// search result was added twice.
    pub id: String,

    #[serde(default = "default_title")]
    pub title: String,

    /// Display string; several authors are joined with ", ".
    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_cover_url")]
    pub cover_url: String,

    #[serde(default)]
    pub status: ReadingStatus,

    /// Star rating, 0 (unrated) to 5. Not clamped here.
    #[serde(default)]
    pub rating: u8,

    #[serde(default)]
    pub archived: bool,

    /// Set once at creation.
    #[serde(default)]
    #[ts(as = "String")]
    pub date_added: DateTime<Utc>,

    /// Set the first time the book is completed, then never touched again.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date_completed: Option<DateTime<Utc>>,

    #[serde(default)]
    pub icon_type: IconType,
}

fn default_title() -> String {
    UNKNOWN_TITLE.to_string()
}

fn default_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

fn default_cover_url() -> String {
    DEFAULT_COVER_URL.to_string()
}

impl Book {
    /// Builds a new list entry from a search result.
    ///
    /// ## Defaults
    /// - title / author / cover fall back to the "Unknown" values and the
    ///   placeholder cover
    /// - status = reading, rating = 0, archived = false, icon = frog
    /// - date_added = `now`
    pub fn from_candidate(
        candidate: &SearchCandidate,
        placeholder_cover_url: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Book {
            id: candidate.id.clone(),
            title: candidate.display_title().to_string(),
            author: candidate.display_author(),
            cover_url: candidate.cover_or(placeholder_cover_url).to_string(),
            status: ReadingStatus::Reading,
            rating: 0,
            archived: false,
            date_added: now,
            date_completed: None,
            icon_type: IconType::Frog,
        }
    }

    /// Sets the status, stamping `date_completed` on the first completion.
    pub fn set_status(&mut self, status: ReadingStatus, now: DateTime<Utc>) {
        self.status = status;
        if status == ReadingStatus::Completed && self.date_completed.is_none() {
            self.date_completed = Some(now);
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == ReadingStatus::Completed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dune() -> SearchCandidate {
        SearchCandidate {
            id: "B1".to_string(),
            title: Some("Dune".to_string()),
            authors: Some(vec!["Frank Herbert".to_string()]),
            cover_url: Some("u1".to_string()),
        }
    }

    #[test]
    fn test_from_candidate_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let book = Book::from_candidate(&dune(), DEFAULT_COVER_URL, now);

        assert_eq!(book.id, "B1");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.cover_url, "u1");
        assert_eq!(book.status, ReadingStatus::Reading);
        assert_eq!(book.rating, 0);
        assert!(!book.archived);
        assert_eq!(book.icon_type, IconType::Frog);
        assert_eq!(book.date_added, now);
        assert!(book.date_completed.is_none());
    }

    #[test]
    fn test_from_candidate_fills_missing_fields() {
        let candidate = SearchCandidate {
            id: "X".to_string(),
            title: Some(String::new()),
            authors: None,
            cover_url: None,
        };
        let book = Book::from_candidate(&candidate, "placeholder", Utc::now());

        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.cover_url, "placeholder");
    }

    #[test]
    fn test_multiple_authors_joined() {
        let candidate = SearchCandidate {
            authors: Some(vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()]),
            ..dune()
        };
        assert_eq!(candidate.display_author(), "Terry Pratchett, Neil Gaiman");

        let nobody = SearchCandidate {
            authors: Some(vec![]),
            ..dune()
        };
        assert_eq!(nobody.display_author(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_set_status_stamps_completion_once() {
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut book = Book::from_candidate(&dune(), DEFAULT_COVER_URL, first);

        book.set_status(ReadingStatus::Completed, first);
        book.set_status(ReadingStatus::Reading, later);
        book.set_status(ReadingStatus::Completed, later);

        assert_eq!(book.date_completed, Some(first));
        assert!(book.is_completed());
    }

    #[test]
    fn test_filter_predicates() {
        let mut book = Book::from_candidate(&dune(), DEFAULT_COVER_URL, Utc::now());
        assert!(Filter::All.matches(&book));
        assert!(Filter::Reading.matches(&book));
        assert!(!Filter::Archived.matches(&book));

        book.archived = true;
        book.status = ReadingStatus::Completed;
        assert!(!Filter::All.matches(&book));
        assert!(!Filter::Completed.matches(&book));
        assert!(Filter::Archived.matches(&book));
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("Reading".parse::<Filter>().unwrap(), Filter::Reading);
        assert_eq!(" archived ".parse::<Filter>().unwrap(), Filter::Archived);
        assert!("favourites".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn test_status_and_icon_parsing() {
        assert_eq!("completed".parse::<ReadingStatus>().unwrap(), ReadingStatus::Completed);
        assert!("archived".parse::<ReadingStatus>().is_err());
        assert_eq!("elephant".parse::<IconType>().unwrap(), IconType::Elephant);
        assert!("giraffe".parse::<IconType>().is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let book = Book::from_candidate(&dune(), DEFAULT_COVER_URL, Utc::now());
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["coverUrl"], "u1");
        assert_eq!(json["status"], "reading");
        assert_eq!(json["iconType"], "frog");
        assert!(json.get("dateAdded").is_some());
        assert!(json["dateCompleted"].is_null());
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        // Shape written before icon tags and completion dates existed
        let json = r#"{
            "id": "old-1",
            "title": "Emma",
            "author": "Jane Austen",
            "coverUrl": "c",
            "status": "completed",
            "rating": 4,
            "archived": false,
            "dateAdded": "2023-05-01T10:00:00.000Z"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();

        assert_eq!(book.icon_type, IconType::Frog);
        assert!(book.date_completed.is_none());
        assert_eq!(book.rating, 4);
        assert_eq!(book.status, ReadingStatus::Completed);

        let bare: Book = serde_json::from_str(r#"{"id":"bare"}"#).unwrap();
        assert_eq!(bare.title, UNKNOWN_TITLE);
        assert_eq!(bare.author, UNKNOWN_AUTHOR);
        assert_eq!(bare.cover_url, DEFAULT_COVER_URL);
        assert_eq!(bare.status, ReadingStatus::Reading);
    }
}
