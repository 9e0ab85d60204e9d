//! Unified error handling for the api.
//!
//! Provides a unified `AppError` type that maps domain failures to HTTP
//! responses. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the api.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A path or body identifier is not a well-formed UUID.
    #[error("Invalid id: {0}")]
    InvalidId(String),
}

/// JSON body returned for failed requests.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors; business 404s and client 400s are expected traffic
        if matches!(
            self,
            Self::Repository(RepositoryError::Database(_) | RepositoryError::DataCorruption(_))
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Repository(RepositoryError::UserNotFound) => StatusCode::NOT_FOUND,
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidId(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Repository(RepositoryError::UserNotFound) => "user not found".to_string(),
            Self::Repository(_) => "Internal server error".to_string(),
            Self::InvalidId(_) => self.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
