//! # Error Types
//!
//! Domain-specific error types for bookclub-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookclub-core errors (this file)                                      │
//! │  ├── CoreError        - Domain errors (unknown names)                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bookclub-store errors                                                 │
//! │  └── StoreError       - Blob store failures (logged, never surfaced)   │
//! │                                                                         │
//! │  bookclub-search errors                                                │
//! │  └── SearchError      - Catalog lookup failures                        │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Renderer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lookup miss (no book with the requested id) is NOT an error anywhere in
//! this crate. Mutations report it by returning `false`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A filter name outside all / reading / completed / archived.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// A status name outside reading / completed.
    #[error("Unknown reading status: {0}")]
    UnknownStatus(String),

    /// An icon name outside frog / elephant.
    #[error("Unknown icon type: {0}")]
    UnknownIcon(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised by the command layer before a value reaches the store.
/// The store itself accepts whatever it is given.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a non-numeric rating).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
