//! # Stormy Book Club Terminal Library
//!
//! Wires configuration, storage, catalog search and the command loop.
//!
//! ## Module Organization
//! ```text
//! bookclub_app/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── config.rs       ◄─── TOML + env configuration
//! ├── error.rs        ◄─── ApiError / ConfigError
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── library.rs  ◄─── Reading list behind an async mutex
//! │   ├── search.rs   ◄─── Search dropdown contents
//! │   └── storage.rs  ◄─── Configured blob store
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── books.rs    ◄─── List view and mutations
//! │   └── search.rs   ◄─── Catalog search and add
//! ├── cli.rs          ◄─── Command grammar
//! ├── shell.rs        ◄─── Line → command → reply
//! └── render.rs       ◄─── Text rendering
//! ```
//!
//! ## State Management
//! ```text
//! ┌──────────────────────────────┐ ┌──────────────────────────────┐
//! │  LibraryState                │ │  SearchState                 │
//! │  • BookListStore             │ │  • last query + results      │
//! │  • tokio Mutex, one writer   │ │  • dropdown visibility       │
//! └──────────────────────────────┘ └──────────────────────────────┘
//! ```
//! Searches only touch `SearchState`, so a slow lookup never holds up a
//! mutation of the list.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use bookclub_search::GoogleBooksClient;
use bookclub_store::BookListStore;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use error::ApiError;
use render::ConsoleRenderer;
use shell::Shell;
use state::{LibraryState, SearchState, StorageBackend};

/// Runs the terminal application until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → config.toml → BOOKCLUB_* env vars → validate           │
/// │                                                                         │
/// │  2. Open Storage ─────────────────────────────────────────────────────► │
/// │     • sqlite (WAL, migrations) │ json files │ memory                    │
/// │                                                                         │
/// │  3. Load the Reading List ────────────────────────────────────────────► │
/// │     • missing or corrupt blob → empty list                              │
/// │     • first render                                                      │
/// │                                                                         │
/// │  4. Command Loop ─────────────────────────────────────────────────────► │
/// │     • one line per command, searches in the background                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> Result<(), ApiError> {
    info!("Starting Stormy Book Club");

    let config = AppConfig::load(config_path)?;
    let backend = StorageBackend::open(&config.storage).await?;

    let mut store = BookListStore::with_emitter(
        backend.clone(),
        config.store_options(),
        Arc::new(ConsoleRenderer),
    );
    store.load().await;
    store.render();

    let catalog = Arc::new(GoogleBooksClient::new(config.search.client_config())?);
    let mut shell = Shell::new(
        LibraryState::new(store),
        SearchState::new(),
        catalog,
        config.search.max_results,
    );

    println!("Type help for a list of commands.");

    let result = shell.run(BufReader::new(tokio::io::stdin())).await;

    backend.close().await;
    info!("Goodbye");
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the rendered list.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bookclub_store=trace` - Trace the store only
/// - Default: INFO, DEBUG for the bookclub crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookclub=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
