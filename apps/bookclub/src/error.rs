//! # Application Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stormy Book Club                       │
//! │                                                                         │
//! │  Terminal line ──► Command handler ──► Result<T, ApiError>             │
//! │                          │                                              │
//! │   ValidationError ───────┤ rating out of range, query too long         │
//! │   CoreError ─────────────┤ unknown filter / status / icon              │
//! │   StoreError ────────────┤ only while opening a backend                │
//! │   SearchError ───────────┤ shown as one generic notice                 │
//! │                          ▼                                              │
//! │                   ApiError { code, message } ──► printed to the user   │
//! │                                                                         │
//! │  Lookup misses are NOT errors: mutations on unknown ids are no-ops.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bookclub_core::{CoreError, ValidationError};
use bookclub_search::SearchError;
use bookclub_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Notice shown for every failed catalog search.
pub const SEARCH_FAILED_NOTICE: &str = "Error searching for books. Please try again.";

// =============================================================================
// Config Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,

    #[error("No data directory available for the {backend} backend; set BOOKCLUB_DATA_PATH")]
    NoDataPath { backend: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// API Errors
// =============================================================================

/// Error returned from command handlers.
///
/// ## Serialization
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "rating must be between 0 and 5" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown search result or other missing resource
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A destructive action was not confirmed
    ConfirmationRequired,

    /// Catalog search failed
    SearchFailed,

    /// Blob store could not be opened
    StorageError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Storage error: {}", err);
        match err {
            StoreError::Internal(_) => ApiError::internal("Storage operation failed"),
            other => ApiError::new(ErrorCode::StorageError, other.to_string()),
        }
    }
}

/// Every search failure reads the same to the user; details go to the log.
impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidQuery(e) => e.into(),
            other => {
                tracing::warn!(retryable = other.is_retryable(), "Catalog search failed: {}", other);
                ApiError::new(ErrorCode::SearchFailed, SEARCH_FAILED_NOTICE)
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_failures_use_generic_notice() {
        for err in [
            SearchError::RateLimited,
            SearchError::HttpStatus { status: 500 },
            SearchError::RequestFailed {
                message: "dns".to_string(),
            },
            SearchError::InvalidResponse {
                message: "eof".to_string(),
            },
        ] {
            let api: ApiError = err.into();
            assert_eq!(api.code, ErrorCode::SearchFailed);
            assert_eq!(api.message, SEARCH_FAILED_NOTICE);
        }
    }

    #[test]
    fn test_invalid_query_is_validation_error() {
        let err = SearchError::InvalidQuery(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
        let api: ApiError = err.into();
        assert_eq!(api.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_core_errors_are_validation() {
        let api: ApiError = CoreError::UnknownFilter("weird".to_string()).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert!(api.message.contains("weird"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Search result", "v9")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Search result not found: v9");
    }
}
