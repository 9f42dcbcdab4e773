//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Stride.
///
/// Primary store failures (`Database`, `Timeout`) propagate to callers.
/// `Cache` errors are produced by the cache clients but are swallowed by the
/// cache-aside layer and never reach a response.
#[derive(Error, Debug)]
pub enum StrideError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrideError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Timeout(_) => 503,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for "entity absent" outcomes, as opposed to failures.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the error originated in the primary store.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Timeout(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StrideError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // MySQL duplicate entry
                if db_err.code().is_some_and(|code| code == "23000" || code == "1062") {
                    return Self::Conflict(db_err.message().to_string());
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StrideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `StrideError`.
    #[must_use]
    pub fn from_error(error: &StrideError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&StrideError> for ErrorResponse {
    fn from(error: &StrideError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(StrideError::not_found("User", 1).status_code(), 404);
        assert_eq!(StrideError::validation("bad id").status_code(), 400);
        assert_eq!(StrideError::conflict("duplicate").status_code(), 409);
        assert_eq!(StrideError::Database("down".to_string()).status_code(), 500);
        assert_eq!(StrideError::Timeout("slow".to_string()).status_code(), 503);
        assert_eq!(StrideError::cache("unreachable").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(StrideError::not_found("Task", "t1").error_code(), "NOT_FOUND");
        assert_eq!(StrideError::cache("x").error_code(), "CACHE_ERROR");
        assert_eq!(StrideError::internal("x").error_code(), "INTERNAL_ERROR");
        assert_eq!(StrideError::Timeout("t".to_string()).error_code(), "TIMEOUT");
    }

    #[test]
    fn test_not_found_is_distinct_from_store_failure() {
        let absent = StrideError::not_found("User", "u1");
        assert!(absent.is_not_found());
        assert!(!absent.is_store_failure());

        let failed = StrideError::Database("connection refused".to_string());
        assert!(!failed.is_not_found());
        assert!(failed.is_store_failure());
        assert!(StrideError::Timeout("deadline".to_string()).is_store_failure());
    }

    #[test]
    fn test_error_response_from_error() {
        let err = StrideError::not_found("User", "abc");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("abc"));
    }
}
