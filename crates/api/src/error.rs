use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use trackshare_core::error::CoreError;
use trackshare_core::gpx::DecodeError;
use trackshare_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Keeps validation, not-found, decode and storage failures apart so a
/// client never confuses "track not found" with "track found but corrupt".
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `trackshare_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A stored document could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A failure of the track store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut field = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidField {
                    field: name,
                    message,
                } => {
                    field = Some(*name);
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            // --- Read-path decoding ---
            AppError::Decode(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DECODE_ERROR",
                err.to_string(),
            ),

            // --- Storage ---
            AppError::Store(StoreError::EmptyContent) => {
                field = Some("content");
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    StoreError::EmptyContent.to_string(),
                )
            }
            AppError::Store(StoreError::Database(err)) => classify_sqlx_error(err),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Check constraint violations (constraint name starting with `ck_`) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            // PostgreSQL unique_violation
            Some("23505") if constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            // PostgreSQL check_violation
            Some("23514") if constraint.starts_with("ck_") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    internal_error()
}
