// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., quiz already attempted)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Outcomes of the attempt lifecycle and the analytics reads.
///
/// Everything except `Persistence` is an expected, recoverable rejection.
#[derive(Debug)]
pub enum QuizError {
    /// A score already exists for (user, quiz), or another session holds the attempt.
    AlreadyAttempted,

    /// Submission without a matching start.
    NotStarted,

    /// The referenced quiz does not exist.
    NotFound(String),

    /// The store rejected or failed an operation. Attempt state is unchanged.
    Persistence(sqlx::Error),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::AlreadyAttempted => write!(f, "You have already attempted this quiz"),
            QuizError::NotStarted => write!(f, "Quiz attempt has not been started"),
            QuizError::NotFound(what) => write!(f, "{} not found", what),
            QuizError::Persistence(err) => write!(f, "persistence failure: {}", err),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for QuizError {
    fn from(err: sqlx::Error) -> Self {
        QuizError::Persistence(err)
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::AlreadyAttempted => AppError::Conflict(err.to_string()),
            QuizError::NotStarted => AppError::BadRequest(err.to_string()),
            QuizError::NotFound(_) => AppError::NotFound(err.to_string()),
            QuizError::Persistence(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}
