//! # Validation Module
//!
//! Input validation for the command layer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command handler                                              │
//! │  ├── Parses user input (ids, ratings, names)                           │
//! │  └── THIS MODULE: range and length checks                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: BookListStore                                                │
//! │  ├── No validation at all                                              │
//! │  └── Unknown ids are silent no-ops                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Deserialization                                              │
//! │  └── Defaults for missing fields, nothing else                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookclub_core::validation::{validate_rating, validate_search_query};
//!
//! assert_eq!(validate_rating(4).unwrap(), 4);
//! assert!(validate_rating(6).is_err());
//! assert_eq!(validate_search_query("  dune ").unwrap(), "dune");
//! ```

use crate::error::ValidationError;
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest search query accepted.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a book id supplied by the user.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_book_id(id: &str) -> ValidationResult<&str> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(id)
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (the search is skipped)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a star rating.
///
/// ## Rules
/// - 0 clears the rating
/// - 1 to 5 are the stars
pub fn validate_rating(rating: i64) -> ValidationResult<u8> {
    if !(0..=MAX_RATING as i64).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: MAX_RATING as i64,
        });
    }

    Ok(rating as u8)
}

/// Parses and validates a rating typed by the user.
pub fn parse_rating(raw: &str) -> ValidationResult<u8> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "rating".to_string(),
            reason: format!("'{}' is not a whole number", raw.trim()),
        })?;

    validate_rating(value)
}

/// Parses a 1-based list position typed by the user into a 0-based index.
pub fn parse_position(raw: &str) -> ValidationResult<usize> {
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "position".to_string(),
            reason: format!("'{}' is not a list position", raw.trim()),
        })?;

    value.checked_sub(1).ok_or(ValidationError::OutOfRange {
        field: "position".to_string(),
        min: 1,
        max: i64::MAX,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
