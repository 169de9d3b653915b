use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::error::CoreError;
use folio_core::validation::field_messages;
use serde::Serialize;

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`], storage failures as
/// [`sqlx::Error`]. Both render as `{ "error": ..., "code": ... }`, with a
/// `"fields"` map added for field-level validation failures. Internal causes
/// are logged and never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::InvalidFields(errors))
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            fields: None,
        }
    }

    /// Sanitized 500 body. The cause only goes to the log.
    fn internal(cause: &dyn std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %cause, "{context}");
        Self::new("INTERNAL_ERROR", "An internal error occurred")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("BAD_REQUEST", msg.as_str()),
            ),
            AppError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::internal(msg, "Internal error"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, ErrorBody) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", format!("{entity} with id {id} not found")),
        ),
        CoreError::NotFoundBy { entity, key } => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", format!("{entity} '{key}' not found")),
        ),
        CoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("VALIDATION_ERROR", msg.as_str()),
        ),
        CoreError::InvalidFields(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody {
                fields: Some(field_messages(errors)),
                ..ErrorBody::new("VALIDATION_ERROR", "One or more fields are invalid")
            },
        ),
        CoreError::Conflict(msg) => (
            StatusCode::CONFLICT,
            ErrorBody::new("CONFLICT", msg.as_str()),
        ),
        CoreError::Unauthorized(msg) => (
            StatusCode::UNAUTHORIZED,
            ErrorBody::new("UNAUTHORIZED", msg.as_str()),
        ),
        CoreError::Forbidden(msg) => (
            StatusCode::FORBIDDEN,
            ErrorBody::new("FORBIDDEN", msg.as_str()),
        ),
        CoreError::RateLimited(msg) => (
            StatusCode::TOO_MANY_REQUESTS,
            ErrorBody::new("RATE_LIMITED", msg.as_str()),
        ),
        CoreError::Internal(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::internal(msg, "Internal core error"),
        ),
    }
}

/// Map storage failures onto HTTP.
///
/// | sqlx error | status |
/// |---|---|
/// | `RowNotFound` | 404 |
/// | `23505` unique violation on a `uq_*` constraint | 409 |
/// | `23514` check or `23503` foreign-key violation | 400 |
/// | anything else | 500, sanitized |
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    let sqlx::Error::Database(db_err) = err else {
        return match err {
            sqlx::Error::RowNotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("NOT_FOUND", "Resource not found"),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::internal(other, "Database error"),
            ),
        };
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            ErrorBody::new(
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            ),
        ),
        Some("23514" | "23503") => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new(
                "CONSTRAINT_VIOLATION",
                format!("Value violates constraint: {constraint}"),
            ),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::internal(db_err, "Database error"),
        ),
    }
}
