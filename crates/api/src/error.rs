use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use duties_core::error::{CoreError, ErrorBody};

/// Message rendered for every internal failure. Details stay in the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for service errors and adds request-parsing
/// failures. Implements [`IntoResponse`] to produce the
/// `{"status": ..., "message": ...}` error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An error from the duty service.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request could not be parsed (query string, JSON body).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(CoreError::BadRequest(msg)) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Core(CoreError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
