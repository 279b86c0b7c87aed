//! # Commands Module
//!
//! UI-agnostic handlers. Each takes the state it needs and returns
//! `Result<_, ApiError>`; the terminal shell is one caller, a desktop shell
//! could be another.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── books.rs    ◄─── View, filter, status, rating, icon, archive, delete, order
//! └── search.rs   ◄─── Catalog search, add from results, dismiss
//! ```

pub mod books;
pub mod search;
