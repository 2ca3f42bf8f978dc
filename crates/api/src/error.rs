use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hvlab_core::error::CoreError;
use hvlab_notify::SmsError;
use serde_json::json;

/// Message returned for unique-constraint violations.
pub const DUPLICATE_MESSAGE: &str = "이미 존재하는 데이터입니다";

/// Message returned for foreign-key violations.
pub const INVALID_REFERENCE_MESSAGE: &str = "참조하는 데이터가 존재하지 않습니다";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses
/// of the form `{ "success": false, "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hvlab_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// SMS provider or transport failure.
    #[error(transparent)]
    Sms(#[from] SmsError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- SMS ---
            AppError::Sms(err) => match err {
                SmsError::NotConfigured => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SMS_NOT_CONFIGURED",
                    "SMS 발송이 설정되지 않았습니다".to_string(),
                ),
                SmsError::Provider { message, .. } => {
                    (StatusCode::BAD_REQUEST, "SMS_PROVIDER_ERROR", message.clone())
                }
                SmsError::Transport(e) => {
                    tracing::error!(error = %e, "SMS transport failure");
                    (
                        StatusCode::BAD_GATEWAY,
                        "SMS_TRANSPORT_ERROR",
                        "SMS 발송 서버에 연결할 수 없습니다".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique and primary-key violations map to 400 `DUPLICATE`.
/// - Foreign-key violations map to 400 `INVALID_REFERENCE`.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return (
                    StatusCode::BAD_REQUEST,
                    "DUPLICATE",
                    DUPLICATE_MESSAGE.to_string(),
                );
            }
            if db_err.is_foreign_key_violation() {
                return (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    INVALID_REFERENCE_MESSAGE.to_string(),
                );
            }
            tracing::error!(error = %db_err, code = ?db_err.code(), "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
