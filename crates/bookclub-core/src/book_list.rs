//! # Book List
//!
//! The ordered reading list and every mutation on it.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Book List Operations                                 │
//! │                                                                         │
//! │  UI Action              Method                   List Change            │
//! │  ─────────              ──────                   ───────────            │
//! │                                                                         │
//! │  Add from search ──────► push() ───────────────► books.push(book)       │
//! │                                                                         │
//! │  Complete / Undo ──────► update_status() ──────► books[i].status = s    │
//! │                                                                         │
//! │  Click a star ─────────► update_rating() ──────► books[i].rating = n    │
//! │                                                                         │
//! │  Archive / Unarchive ──► set_archived() ───────► books[i].archived = f  │
//! │                                                                         │
//! │  Delete ───────────────► remove() ─────────────► books.retain(..)       │
//! │                                                                         │
//! │  Drop after drag ──────► reorder() ────────────► books = new order      │
//! │                                                                         │
//! │  Up / Down arrow ──────► move_adjacent() ──────► books.swap(i, j)       │
//! │                                                                         │
//! │  NOTE: lookups are linear scans by id. An id that matches nothing is    │
//! │        a silent no-op reported as `false`.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Book, Filter, IconType, ReadingStatus};

// =============================================================================
// Move Direction
// =============================================================================

/// Which neighbour `move_adjacent` swaps with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards the top of the list (index - 1).
    Up,
    /// Towards the bottom of the list (index + 1).
    Down,
}

impl MoveDirection {
    /// Index of the neighbour, or None when it would be negative.
    fn target(self, index: usize) -> Option<usize> {
        match self {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        }
    }
}

// =============================================================================
// Book List
// =============================================================================

/// The reading list, in the reader's own order.
///
/// ## Invariants
/// - Order is meaningful: it is the manual ranking
/// - No secondary index; `id` lookups scan from the front
/// - Ids are unique unless the same search result was added twice, which
///   this type deliberately does not prevent
///
/// Serializes transparently as a JSON array of books, which is exactly the
/// persisted blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookList {
    books: Vec<Book>,
}

impl BookList {
    /// Creates an empty list.
    pub fn new() -> Self {
        BookList { books: Vec::new() }
    }

    /// Wraps an existing sequence, keeping its order.
    pub fn from_books(books: Vec<Book>) -> Self {
        BookList { books }
    }

    /// All books in list order, archived ones included.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// First book with the given id.
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    /// Appends a book to the end of the list.
    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Sets a book's status.
    ///
    /// Moving into `Completed` stamps `date_completed` with `now` unless it
    /// was already stamped by an earlier completion.
    pub fn update_status(&mut self, id: &str, status: ReadingStatus, now: DateTime<Utc>) -> bool {
        match self.get_mut(id) {
            Some(book) => {
                book.set_status(status, now);
                true
            }
            None => false,
        }
    }

    /// Sets a book's star rating. The value is stored as given.
    pub fn update_rating(&mut self, id: &str, rating: u8) -> bool {
        match self.get_mut(id) {
            Some(book) => {
                book.rating = rating;
                true
            }
            None => false,
        }
    }

    pub fn update_icon(&mut self, id: &str, icon: IconType) -> bool {
        match self.get_mut(id) {
            Some(book) => {
                book.icon_type = icon;
                true
            }
            None => false,
        }
    }

    pub fn set_archived(&mut self, id: &str, archived: bool) -> bool {
        match self.get_mut(id) {
            Some(book) => {
                book.archived = archived;
                true
            }
            None => false,
        }
    }

    /// Removes every book with the given id.
    ///
    /// ## Returns
    /// * `true` - at least one book was removed
    /// * `false` - nothing matched
    pub fn remove(&mut self, id: &str) -> bool {
        let initial_len = self.books.len();
        self.books.retain(|b| b.id != id);
        self.books.len() != initial_len
    }

    /// Replaces the list with the books named in `ids`, in that order.
    ///
    /// ## Full-Replacement Semantics
    /// ```text
    /// books = [A, B, C]      reorder(["C", "A"])      books = [C, A]
    ///                                                  (B is dropped)
    /// ```
    ///
    /// - Books whose id is not mentioned are dropped
    /// - Ids that match no book are skipped
    /// - When an id appears more than once, each mention claims the next
    ///   book with that id that has not been placed yet
    pub fn reorder<S: AsRef<str>>(&mut self, ids: &[S]) {
        let mut slots: Vec<Option<Book>> = std::mem::take(&mut self.books)
            .into_iter()
            .map(Some)
            .collect();

        // id -> positions in the old list, front first
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, book) in slots.iter().enumerate().rev() {
            if let Some(book) = book {
                positions.entry(book.id.clone()).or_default().push(pos);
            }
        }

        let mut ordered = Vec::with_capacity(ids.len());
        for id in ids {
            let next = positions.get_mut(id.as_ref()).and_then(|stack| stack.pop());
            if let Some(book) = next.and_then(|pos| slots[pos].take()) {
                ordered.push(book);
            }
        }

        self.books = ordered;
    }

    /// Swaps a book with its neighbour in the filtered view.
    ///
    /// ## How It Works
    /// ```text
    /// books  = [A(reading), X(archived), B(reading), C(completed)]
    /// filter = Reading  → view = [A, B]
    ///
    /// move_adjacent(Reading, 0, Down)
    ///   view[0] = A lives at books[0]
    ///   view[1] = B lives at books[2]
    ///   swap books[0] <-> books[2]
    ///
    /// books  = [B, X, A, C]
    /// ```
    ///
    /// Both books are located by their position in the underlying list, so
    /// the swap is exact even when two entries share an id.
    ///
    /// ## Returns
    /// `false` (and no change) when either index is outside the view.
    pub fn move_adjacent(
        &mut self,
        filter: Filter,
        filtered_index: usize,
        direction: MoveDirection,
    ) -> bool {
        let view: Vec<usize> = self
            .books
            .iter()
            .enumerate()
            .filter(|(_, b)| filter.matches(b))
            .map(|(pos, _)| pos)
            .collect();

        let Some(target_index) = direction.target(filtered_index) else {
            return false;
        };

        match (view.get(filtered_index), view.get(target_index)) {
            (Some(&from), Some(&to)) => {
                self.books.swap(from, to);
                true
            }
            _ => false,
        }
    }

    /// The ordered subsequence of books the filter selects.
    ///
    /// Read-only projection; never changes the list.
    pub fn filtered(&self, filter: Filter) -> Vec<&Book> {
        self.books.iter().filter(|b| filter.matches(b)).collect()
    }

    /// Number of books the filter selects.
    pub fn count(&self, filter: Filter) -> usize {
        self.books.iter().filter(|b| filter.matches(b)).count()
    }
}

impl From<Vec<Book>> for BookList {
    fn from(books: Vec<Book>) -> Self {
        BookList::from_books(books)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchCandidate;
    use crate::DEFAULT_COVER_URL;
    use chrono::TimeZone;

    fn book(id: &str, status: ReadingStatus) -> Book {
        let candidate = SearchCandidate {
            id: id.to_string(),
            title: Some(format!("Book {}", id)),
            authors: Some(vec![format!("Author {}", id)]),
            cover_url: None,
        };
        let mut book = Book::from_candidate(&candidate, DEFAULT_COVER_URL, Utc::now());
        book.status = status;
        book
    }

    fn ids(list: &BookList) -> Vec<&str> {
        list.books().iter().map(|b| b.id.as_str()).collect()
    }

    fn abc() -> BookList {
        BookList::from_books(vec![
            book("A", ReadingStatus::Reading),
            book("B", ReadingStatus::Reading),
            book("C", ReadingStatus::Completed),
        ])
    }

    #[test]
    fn test_push_then_remove() {
        let mut list = abc();
        list.push(book("D", ReadingStatus::Reading));
        assert_eq!(list.len(), 4);

        assert!(list.remove("D"));
        assert_eq!(list.len(), 3);
        assert!(list.get("D").is_none());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = abc();
        assert!(!list.remove("Z"));
        assert_eq!(ids(&list), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_status_stamps_completion_once() {
        let first = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 2, 2, 9, 0, 0).unwrap();
        let mut list = abc();

        assert!(list.update_status("A", ReadingStatus::Completed, first));
        assert_eq!(list.get("A").unwrap().date_completed, Some(first));

        assert!(list.update_status("A", ReadingStatus::Completed, second));
        assert_eq!(list.get("A").unwrap().date_completed, Some(first));
    }

    #[test]
    fn test_reading_status_never_stamps() {
        let mut list = abc();
        assert!(list.update_status("B", ReadingStatus::Reading, Utc::now()));
        assert!(list.get("B").unwrap().date_completed.is_none());
    }

    #[test]
    fn test_updates_on_missing_id_return_false() {
        let mut list = abc();
        let before = list.clone();

        assert!(!list.update_status("Z", ReadingStatus::Completed, Utc::now()));
        assert!(!list.update_rating("Z", 3));
        assert!(!list.update_icon("Z", IconType::Elephant));
        assert!(!list.set_archived("Z", true));

        assert_eq!(list, before);
    }

    #[test]
    fn test_rating_is_not_clamped() {
        let mut list = abc();
        assert!(list.update_rating("A", 9));
        assert_eq!(list.get("A").unwrap().rating, 9);
    }

    #[test]
    fn test_icon_and_archive() {
        let mut list = abc();
        assert!(list.update_icon("B", IconType::Elephant));
        assert!(list.set_archived("B", true));

        let b = list.get("B").unwrap();
        assert_eq!(b.icon_type, IconType::Elephant);
        assert!(b.archived);
        assert_eq!(b.status, ReadingStatus::Reading);
    }

    #[test]
    fn test_filtered_views() {
        let mut list = abc();
        list.set_archived("B", true);
        list.push(book("D", ReadingStatus::Completed));
        list.set_archived("D", true);

        let view = |f| -> Vec<String> { list.filtered(f).iter().map(|b| b.id.clone()).collect() };
        assert_eq!(view(Filter::All), vec!["A", "C"]);
        assert_eq!(view(Filter::Reading), vec!["A"]);
        assert_eq!(view(Filter::Completed), vec!["C"]);
        assert_eq!(view(Filter::Archived), vec!["B", "D"]);
        assert_eq!(list.count(Filter::Archived), 2);
    }

    #[test]
    fn test_reorder_full_replacement() {
        let mut list = abc();
        list.reorder(&["C", "A"]);
        assert_eq!(ids(&list), vec!["C", "A"]);
    }

    #[test]
    fn test_reorder_skips_unknown_ids() {
        let mut list = abc();
        list.reorder(&["B", "nope", "A", "C"]);
        assert_eq!(ids(&list), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_reorder_with_duplicate_ids() {
        let mut first = book("A", ReadingStatus::Reading);
        first.rating = 1;
        let mut second = book("A", ReadingStatus::Reading);
        second.rating = 2;
        let mut list = BookList::from_books(vec![first, book("B", ReadingStatus::Reading), second]);

        list.reorder(&["A", "B", "A", "A"]);

        let ratings: Vec<u8> = list.books().iter().map(|b| b.rating).collect();
        assert_eq!(ids(&list), vec!["A", "B", "A"]);
        assert_eq!(ratings, vec![1, 0, 2]);
    }

    #[test]
    fn test_move_adjacent_within_filter() {
        let mut list = abc();
        assert!(list.move_adjacent(Filter::Reading, 0, MoveDirection::Down));
        assert_eq!(ids(&list), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_move_adjacent_skips_hidden_books() {
        let mut list = BookList::from_books(vec![
            book("A", ReadingStatus::Reading),
            book("X", ReadingStatus::Completed),
            book("B", ReadingStatus::Reading),
            book("C", ReadingStatus::Completed),
        ]);

        assert!(list.move_adjacent(Filter::Reading, 1, MoveDirection::Up));
        assert_eq!(ids(&list), vec!["B", "X", "A", "C"]);
    }

    #[test]
    fn test_move_adjacent_out_of_bounds() {
        let mut list = abc();
        assert!(!list.move_adjacent(Filter::Reading, 0, MoveDirection::Up));
        assert!(!list.move_adjacent(Filter::Reading, 1, MoveDirection::Down));
        assert!(!list.move_adjacent(Filter::Reading, 7, MoveDirection::Up));
        assert_eq!(ids(&list), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list = abc();
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with('['));

        let back: BookList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
