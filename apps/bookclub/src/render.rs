//! # Text Renderer
//!
//! Turns the filtered view and the search dropdown into terminal text.
//!
//! ## Book Entry Layout
//! ```text
//!  2. Dune
//!     Frank Herbert
//!     [Completed] ★★★★☆  elephant  finished 2024-03-02
//!     id: zyTCAlFPjgYC
//! ```

use std::io::Write;

use bookclub_core::{Book, Filter, IconType, MAX_RATING};
use bookclub_store::RenderEmitter;

use crate::state::SearchResults;

/// Prints every re-render to stdout.
pub struct ConsoleRenderer;

impl RenderEmitter for ConsoleRenderer {
    fn emit_render(&self, filter: Filter, view: &[&Book]) {
        let mut out = std::io::stdout().lock();
        // A closed stdout only loses the redraw.
        let _ = writeln!(out, "{}", format_view(filter, view));
    }
}

// =============================================================================
// Book List
// =============================================================================

/// Title and hint shown when a filter selects nothing.
pub fn empty_state(filter: Filter) -> (&'static str, &'static str) {
    match filter {
        Filter::All => (
            "No books yet",
            "Start by searching for books to add to your list!",
        ),
        Filter::Reading => ("No books in progress", "Add some books to start reading!"),
        Filter::Completed => (
            "No completed books",
            "Finish reading some books to see them here!",
        ),
        Filter::Archived => (
            "No archived books",
            "Archive books you want to hide from your main list.",
        ),
    }
}

/// `★` for each point of `rating`, `☆` up to five.
pub fn stars(rating: u8) -> String {
    (1..=MAX_RATING)
        .map(|i| if i <= rating { '★' } else { '☆' })
        .collect()
}

fn icon_tag(icon: IconType) -> &'static str {
    match icon {
        IconType::Frog => "frog",
        IconType::Elephant => "elephant",
    }
}

/// One entry; `position` is the 1-based place in the view.
pub fn format_book(position: usize, book: &Book) -> String {
    let mut status_line = format!(
        "[{}] {}  {}",
        book.status.label(),
        stars(book.rating),
        icon_tag(book.icon_type)
    );
    if book.archived {
        status_line.push_str("  (archived)");
    }
    if let Some(done) = book.date_completed.filter(|_| book.is_completed()) {
        status_line.push_str(&format!("  finished {}", done.format("%Y-%m-%d")));
    }

    format!(
        "{position:>2}. {}\n    {}\n    {status_line}\n    id: {}",
        book.title, book.author, book.id
    )
}

/// The whole view under `filter`, or its empty state.
pub fn format_view(filter: Filter, view: &[&Book]) -> String {
    let mut out = format!("== Reading list: {} ({}) ==\n", filter, view.len());

    if view.is_empty() {
        let (title, hint) = empty_state(filter);
        out.push_str(&format!("   {title}\n   {hint}"));
        return out;
    }

    let entries: Vec<String> = view
        .iter()
        .enumerate()
        .map(|(i, book)| format_book(i + 1, book))
        .collect();
    out.push_str(&entries.join("\n\n"));
    out
}

// =============================================================================
// Search Dropdown
// =============================================================================

pub fn format_results(results: &SearchResults) -> String {
    let mut out = format!("-- Search results for \"{}\" --\n", results.query);

    if results.results.is_empty() {
        out.push_str("   No books found\n   Try a different search term");
        return out;
    }

    let lines: Vec<String> = results
        .results
        .iter()
        .map(|c| format!("   + {}  {} by {}", c.id, c.display_title(), c.display_author()))
        .collect();
    out.push_str(&lines.join("\n"));
    out.push_str("\n   (add <id> to add a book, close to dismiss)");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookclub_core::{ReadingStatus, SearchCandidate};
    use chrono::{TimeZone, Utc};

    fn book() -> Book {
        Book {
            id: "v1".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            cover_url: "c".to_string(),
            status: ReadingStatus::Reading,
            rating: 3,
            archived: false,
            date_added: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            date_completed: None,
            icon_type: IconType::Frog,
        }
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_empty_states_per_filter() {
        assert!(format_view(Filter::All, &[]).contains("No books yet"));
        assert!(format_view(Filter::Reading, &[]).contains("No books in progress"));
        assert!(format_view(Filter::Completed, &[]).contains("No completed books"));
        assert!(format_view(Filter::Archived, &[])
            .contains("Archive books you want to hide from your main list."));
    }

    #[test]
    fn test_format_book_reading() {
        let text = format_book(1, &book());
        assert!(text.starts_with(" 1. Dune"));
        assert!(text.contains("Frank Herbert"));
        assert!(text.contains("[Reading] ★★★☆☆  frog"));
        assert!(text.contains("id: v1"));
        assert!(!text.contains("finished"));
    }

    #[test]
    fn test_format_book_completed_and_archived() {
        let mut b = book();
        b.status = ReadingStatus::Completed;
        b.date_completed = Some(Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap());
        b.archived = true;
        b.icon_type = IconType::Elephant;

        let text = format_book(2, &b);
        assert!(text.contains("[Completed]"));
        assert!(text.contains("elephant  (archived)  finished 2024-03-02"));
    }

    #[test]
    fn test_format_view_numbers_entries() {
        let a = book();
        let mut b = book();
        b.id = "v2".to_string();
        let text = format_view(Filter::All, &[&a, &b]);

        assert!(text.starts_with("== Reading list: all (2) =="));
        assert!(text.contains(" 1. Dune"));
        assert!(text.contains(" 2. Dune"));
    }

    #[test]
    fn test_format_results() {
        let results = SearchResults {
            query: "dune".to_string(),
            results: vec![SearchCandidate {
                id: "v1".to_string(),
                title: None,
                authors: Some(vec!["A".to_string(), "B".to_string()]),
                cover_url: None,
            }],
            visible: true,
        };
        let text = format_results(&results);
        assert!(text.contains("+ v1  Unknown Title by A, B"));

        let empty = SearchResults {
            query: "zzz".to_string(),
            ..SearchResults::default()
        };
        let text = format_results(&empty);
        assert!(text.contains("No books found"));
        assert!(text.contains("Try a different search term"));
    }
}
