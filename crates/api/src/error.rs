use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use staffdir_core::error::DirectoryError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DirectoryError`] and implements [`IntoResponse`] to produce the
/// `{ "error": message, "code": CODE }` JSON envelope the frontend keys on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `staffdir_core`.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Directory(err) => match err {
                DirectoryError::NotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("User with id {id} not found"),
                ),
                DirectoryError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION", msg.clone())
                }
                DirectoryError::DuplicateEmail => (
                    StatusCode::CONFLICT,
                    "EMAIL_EXISTS",
                    "Email is already in use".to_string(),
                ),
                DirectoryError::EmptyPatch => (
                    StatusCode::BAD_REQUEST,
                    "EMPTY_PATCH",
                    "Patch contains no fields".to_string(),
                ),
                DirectoryError::Storage(msg) => {
                    tracing::error!(error = %msg, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
