//! # Terminal Shell
//!
//! Turns one line of input into a command call and tells the loop what to
//! print.
//!
//! ```text
//! stdin line ──► pending delete? ──yes──► y / yes ──► delete_book(confirmed)
//!      │                         └──────► anything else ──► "Delete cancelled."
//!      ▼
//! Command::from_str ──► commands::books / commands::search ──► Reply
//! ```
//!
//! Mutations redraw through the store's render emitter, so most of them
//! reply with [`Reply::Silent`]. Searches run in the background and print
//! their own dropdown when they finish.

use std::io::{ErrorKind, Write};
use std::sync::Arc;

use bookclub_core::{MoveDirection, ReadingStatus};
use bookclub_search::CatalogSearch;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::cli::{Command, HELP};
use crate::commands::books::{self, BookView};
use crate::commands::search::{self, SearchOutcome};
use crate::error::ApiError;
use crate::render::{format_results, format_view};
use crate::state::{LibraryState, SearchResults, SearchState};

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print; a redraw (if any) already happened.
    Silent,
    Text(String),
    /// The next line answers this question.
    Confirm(String),
    Quit,
}

pub struct Shell<C> {
    library: LibraryState,
    search: SearchState,
    catalog: Arc<C>,
    max_results: u32,
    pending_delete: Option<String>,
}

impl<C: CatalogSearch + 'static> Shell<C> {
    pub fn new(library: LibraryState, search: SearchState, catalog: Arc<C>, max_results: u32) -> Self {
        Shell {
            library,
            search,
            catalog,
            max_results,
            pending_delete: None,
        }
    }

    pub fn library(&self) -> &LibraryState {
        &self.library
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// A line that is not valid UTF-8 is skipped; any other read error ends
    /// the session with an error.
    pub async fn run<R>(&mut self, input: R) -> Result<(), ApiError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            prompt();
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!(error = %e, "Skipping unreadable input line");
                    eprintln!("Could not read that line; please use plain text.");
                    continue;
                }
                Err(e) => return Err(ApiError::internal(format!("Failed to read input: {e}"))),
            };

            match self.handle_line(&line).await {
                Ok(Reply::Silent) => {}
                Ok(Reply::Text(text)) => println!("{text}"),
                Ok(Reply::Confirm(question)) => println!("{question}"),
                Ok(Reply::Quit) => return Ok(()),
                Err(err) => eprintln!("{}", err.message),
            }
        }
    }

    /// Handles one input line.
    pub async fn handle_line(&mut self, line: &str) -> Result<Reply, ApiError> {
        if let Some(id) = self.pending_delete.take() {
            return self.answer_delete(&id, line).await;
        }

        let line = line.trim();
        if line.is_empty() {
            return Ok(Reply::Silent);
        }

        let command: Command = line.parse()?;
        self.execute(command).await
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply, ApiError> {
        debug!(?command, "Executing command");

        match command {
            Command::List => {
                let view = books::get_view(&self.library).await;
                Ok(Reply::Text(view_text(&view)))
            }
            Command::Filter(name) => {
                books::set_filter(&self.library, &name).await?;
                Ok(Reply::Silent)
            }
            Command::Search(query) => Ok(self.start_search(query)),
            Command::Add(result_id) => {
                search::add_from_results(&self.library, &self.search, &result_id).await?;
                Ok(Reply::Silent)
            }
            Command::Close => {
                search::dismiss_results(&self.search);
                Ok(Reply::Silent)
            }
            Command::Complete(id) => {
                let found = books::set_status(&self.library, &id, ReadingStatus::Completed).await?;
                Ok(found_or_missing(found, &id))
            }
            Command::Reading(id) => {
                let found = books::set_status(&self.library, &id, ReadingStatus::Reading).await?;
                Ok(found_or_missing(found, &id))
            }
            Command::Rate(id, stars) => {
                let found = books::set_rating(&self.library, &id, i64::from(stars)).await?;
                Ok(found_or_missing(found, &id))
            }
            Command::Icon(id, icon) => {
                let found = books::set_icon(&self.library, &id, icon).await?;
                Ok(found_or_missing(found, &id))
            }
            Command::Archive(id) => {
                let found = books::archive(&self.library, &id).await?;
                Ok(found_or_missing(found, &id))
            }
            Command::Unarchive(id) => {
                let found = books::unarchive(&self.library, &id).await?;
                Ok(found_or_missing(found, &id))
            }
            Command::Delete(id) => {
                let title = self.library.lock().await.get(&id).map(|b| b.title.clone());
                let prompt = match title {
                    Some(title) => {
                        format!("Are you sure you want to delete \"{title}\"? [y/N]")
                    }
                    None => "Are you sure you want to delete this book? [y/N]".to_string(),
                };
                self.pending_delete = Some(id);
                Ok(Reply::Confirm(prompt))
            }
            Command::Up(index) => {
                books::move_book(&self.library, index, MoveDirection::Up).await?;
                Ok(Reply::Silent)
            }
            Command::Down(index) => {
                books::move_book(&self.library, index, MoveDirection::Down).await?;
                Ok(Reply::Silent)
            }
            Command::Order(ids) => {
                books::reorder_books(&self.library, &ids).await?;
                // reorder does not redraw
                let view = books::get_view(&self.library).await;
                Ok(Reply::Text(view_text(&view)))
            }
            Command::Help => Ok(Reply::Text(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    async fn answer_delete(&mut self, id: &str, answer: &str) -> Result<Reply, ApiError> {
        let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        if !confirmed {
            return Ok(Reply::Text("Delete cancelled.".to_string()));
        }
        books::delete_book(&self.library, id, true).await?;
        Ok(Reply::Silent)
    }

    fn start_search(&self, query: String) -> Reply {
        let shown_query = query.trim().to_string();
        search::spawn_search(
            self.search.clone(),
            self.catalog.clone(),
            query,
            self.max_results,
            move |outcome| match outcome {
                Ok(SearchOutcome::Shown(results)) => {
                    let dropdown = SearchResults {
                        query: shown_query,
                        results,
                        visible: true,
                    };
                    println!("{}", format_results(&dropdown));
                }
                Ok(SearchOutcome::Skipped) => {}
                Err(err) => eprintln!("{}", err.message),
            },
        );
        Reply::Silent
    }
}

fn prompt() {
    let mut out = std::io::stdout().lock();
    let _ = write!(out, "> ");
    let _ = out.flush();
}

fn view_text(view: &BookView) -> String {
    let books: Vec<_> = view.books.iter().collect();
    format_view(view.filter, &books)
}

fn found_or_missing(found: bool, id: &str) -> Reply {
    if found {
        Reply::Silent
    } else {
        Reply::Text(format!("No book with id '{id}' on the list."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookclub_core::{Filter, IconType, SearchCandidate};
    use bookclub_search::SearchResult;
    use bookclub_store::{BookListStore, MemoryBlobStore, StoreOptions};

    use crate::error::ErrorCode;
    use crate::state::StorageBackend;

    struct OneBookCatalog;

    impl CatalogSearch for OneBookCatalog {
        async fn search(&self, query: &str, _max: u32) -> SearchResult<Vec<SearchCandidate>> {
            Ok(vec![SearchCandidate {
                id: format!("{query}-1"),
                title: Some("Dune".to_string()),
                authors: Some(vec!["Frank Herbert".to_string()]),
                cover_url: None,
            }])
        }
    }

    fn shell() -> Shell<OneBookCatalog> {
        let store = BookListStore::new(
            StorageBackend::Memory(MemoryBlobStore::new()),
            StoreOptions::default(),
        );
        Shell::new(
            LibraryState::new(store),
            SearchState::new(),
            Arc::new(OneBookCatalog),
            12,
        )
    }

    async fn add_book(shell: &mut Shell<OneBookCatalog>, id: &str) {
        shell.search_state().show(
            "seed",
            vec![SearchCandidate {
                id: id.to_string(),
                title: Some(format!("Book {id}")),
                authors: None,
                cover_url: None,
            }],
        );
        let reply = shell.handle_line(&format!("add {id}")).await.unwrap();
        assert_eq!(reply, Reply::Silent);
    }

    async fn ids(shell: &Shell<OneBookCatalog>) -> Vec<String> {
        shell
            .library()
            .lock()
            .await
            .books()
            .iter()
            .map(|b| b.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_run_skips_invalid_utf8_line() {
        let mut shell = shell();
        let input: &[u8] = b"\xff\xfe garbage\nfilter archived\nquit\n";

        shell.run(input).await.unwrap();

        assert_eq!(shell.library().lock().await.current_filter(), Filter::Archived);
    }

    #[tokio::test]
    async fn test_run_stops_at_end_of_input() {
        let mut shell = shell();
        let input: &[u8] = b"filter completed\n";

        shell.run(input).await.unwrap();

        assert_eq!(shell.library().lock().await.current_filter(), Filter::Completed);
    }

    #[tokio::test]
    async fn test_blank_line_is_silent() {
        let mut shell = shell();
        assert_eq!(shell.handle_line("   ").await.unwrap(), Reply::Silent);
    }

    #[tokio::test]
    async fn test_help_and_quit() {
        let mut shell = shell();
        assert_eq!(shell.handle_line("help").await.unwrap(), Reply::Text(HELP.to_string()));
        assert_eq!(shell.handle_line("quit").await.unwrap(), Reply::Quit);
    }

    #[tokio::test]
    async fn test_list_shows_empty_state() {
        let mut shell = shell();
        match shell.handle_line("list").await.unwrap() {
            Reply::Text(text) => assert!(text.contains("No books yet")),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_then_add() {
        let mut shell = shell();

        shell.execute(Command::Search("dune".to_string())).await.unwrap();
        // the search runs in the background; wait for the dropdown
        for _ in 0..100 {
            if shell.search_state().is_visible() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(shell.search_state().is_visible());

        shell.handle_line("add dune-1").await.unwrap();
        assert_eq!(ids(&shell).await, ["dune-1"]);
        assert!(!shell.search_state().is_visible());
    }

    #[tokio::test]
    async fn test_mutations_on_known_and_unknown_ids() {
        let mut shell = shell();
        add_book(&mut shell, "a").await;

        assert_eq!(shell.handle_line("complete a").await.unwrap(), Reply::Silent);
        assert_eq!(shell.handle_line("rate a 4").await.unwrap(), Reply::Silent);
        assert_eq!(shell.handle_line("icon a elephant").await.unwrap(), Reply::Silent);

        {
            let library = shell.library().lock().await;
            let book = library.get("a").unwrap();
            assert_eq!(book.status, ReadingStatus::Completed);
            assert_eq!(book.rating, 4);
            assert_eq!(book.icon_type, IconType::Elephant);
        }

        match shell.handle_line("archive nope").await.unwrap() {
            Reply::Text(text) => assert!(text.contains("nope")),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_asks_first() {
        let mut shell = shell();
        add_book(&mut shell, "a").await;

        match shell.handle_line("delete a").await.unwrap() {
            Reply::Confirm(prompt) => assert!(prompt.contains("Book a")),
            other => panic!("unexpected reply: {other:?}"),
        }
        assert_eq!(
            shell.handle_line("n").await.unwrap(),
            Reply::Text("Delete cancelled.".to_string())
        );
        assert_eq!(ids(&shell).await, ["a"]);

        shell.handle_line("delete a").await.unwrap();
        assert_eq!(shell.handle_line("YES").await.unwrap(), Reply::Silent);
        assert!(ids(&shell).await.is_empty());
    }

    #[tokio::test]
    async fn test_move_and_order() {
        let mut shell = shell();
        for id in ["a", "b", "c"] {
            add_book(&mut shell, id).await;
        }

        shell.handle_line("down 1").await.unwrap();
        assert_eq!(ids(&shell).await, ["b", "a", "c"]);

        match shell.handle_line("order c a").await.unwrap() {
            Reply::Text(text) => assert!(text.contains("(2)")),
            other => panic!("unexpected reply: {other:?}"),
        }
        assert_eq!(ids(&shell).await, ["c", "a"]);
    }

    #[tokio::test]
    async fn test_filter_and_errors() {
        let mut shell = shell();
        assert_eq!(shell.handle_line("filter archived").await.unwrap(), Reply::Silent);
        assert_eq!(shell.library().lock().await.current_filter(), Filter::Archived);

        let err = shell.handle_line("filter nonsense").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = shell.handle_line("add ghost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        shell.search_state().show("dune", vec![]);
        let err = shell.handle_line("add ghost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
