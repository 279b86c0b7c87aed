//! Search error types.
//!
//! The UI shows every variant as the same generic notice; the detail is for
//! logs.

use bookclub_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was rejected before any request was sent.
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] ValidationError),

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {message}")]
    ClientSetup { message: String },

    /// Transport failure: DNS, connect, timeout.
    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    /// The catalog answered 429.
    #[error("Rate limited by catalog")]
    RateLimited,

    /// Any other non-success status.
    #[error("Catalog returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The body was not the expected JSON shape.
    #[error("Invalid catalog response: {message}")]
    InvalidResponse { message: String },
}

impl SearchError {
    /// Whether trying the same search again later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::RequestFailed { .. } | SearchError::RateLimited => true,
            SearchError::HttpStatus { status } => *status >= 500,
            _ => false,
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(SearchError::RateLimited.is_retryable());
        assert!(SearchError::HttpStatus { status: 503 }.is_retryable());
        assert!(!SearchError::HttpStatus { status: 400 }.is_retryable());
        assert!(!SearchError::InvalidResponse {
            message: "eof".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SearchError::HttpStatus { status: 403 }.to_string(),
            "Catalog returned HTTP 403"
        );
    }
}
