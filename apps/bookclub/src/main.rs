//! # Stormy Book Club Entry Point
//!
//! ```text
//! bookclub [CONFIG]
//! ```
//! `CONFIG` overrides the platform config path
//! (`~/.config/book-club/bookclub.toml` on Linux).
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration
//! 3. Open storage & load the reading list
//! 4. Read commands from stdin

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    bookclub_app::init_tracing();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match bookclub_app::run(config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            eprintln!("{}", err.message);
            ExitCode::FAILURE
        }
    }
}
