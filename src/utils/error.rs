use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::utils::api_response::ApiResponse;

/// Failure taxonomy shared by every handler. Each variant maps to one HTTP
/// status and is rendered through the standard envelope, so no error leaves
/// the service unstructured.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Illegal state transition or duplicate unique field.
    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),

    #[error("Database error")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(format!(
                    "Duplicate value for a unique field: {}",
                    db_err.message()
                ));
            }
        }
        AppError::Database(err)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing failed: {err}"))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("Token generation failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            AppError::Conflict(_) => (StatusCode::CONFLICT, None),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, Some(json!(errors))),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, None),
            AppError::Internal(message) => {
                error!("internal error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
            AppError::Database(err) => {
                error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Some(json!({ "db_error": err.to_string() })),
                )
            }
        };

        ApiResponse::<()>::error(status, self.to_string(), detail).into_response()
    }
}
