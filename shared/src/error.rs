//! Unified error handling
//!
//! [`AppError`] is the single error type crossing module boundaries. Every
//! variant maps to an HTTP status and a stable error code:
//!
//! | Code | Variant | Status |
//! |------|---------|--------|
//! | E0002 | Validation | 400 |
//! | E0003 | NotFound | 404 |
//! | E0004 | Conflict | 409 |
//! | E0005 | CategoryInUse | 422 |
//! | E3001 | Unauthorized | 401 |
//! | E3002 | InvalidToken | 401 |
//! | E9001 | Backend | 502 |
//! | E9002 | Internal | 500 |
//!
//! Backend and internal failures are logged with their detail but reported
//! to the client with a generic message; every other variant carries a
//! message safe to display inline.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid session token")]
    InvalidToken,

    // ========== Business logic (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referential-integrity refusal: the category is still referenced by
    /// menu items. Carries the blocking count for display.
    #[error("Category '{slug}' is used by {count} menu items")]
    CategoryInUse { slug: String, count: usize },

    // ========== System (5xx) ==========
    #[error("Backend call failed: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        AppError::Backend(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// Error body returned to the client
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    /// Blocking count for referential-integrity refusals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_count: Option<usize>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut blocking_count = None;

        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Please sign in first".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "E3002",
                "Invalid session token".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::CategoryInUse { count, .. } => {
                blocking_count = Some(*count);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "E0005",
                    self.to_string(),
                )
            }
            AppError::Backend(msg) => {
                error!(target: "backend", error = %msg, "Backend call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "E9001",
                    "Backend call failed. Please try again.".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            code,
            message,
            blocking_count,
        };
        (status, Json(body)).into_response()
    }
}

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_in_use_names_the_count() {
        let err = AppError::CategoryInUse {
            slug: "drinks".into(),
            count: 3,
        };
        assert_eq!(err.to_string(), "Category 'drinks' is used by 3 menu items");
    }
}
