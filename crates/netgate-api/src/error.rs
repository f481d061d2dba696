//! Maps domain `AppError` to HTTP responses.
//!
//! Only transport-level failures arrive here. Rate-limit denials are a
//! business outcome and travel as a 200 payload from the admission
//! handler; the `RateLimited` mapping below exists for completeness.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use netgate_core::error::{AppError, ErrorKind};

/// Handler result type; `?` converts `AppError` at the HTTP boundary.
pub type ApiResult<T> = Result<T, ApiError>;

/// Newtype carrying `AppError` across the response boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::InvalidIdentity => (StatusCode::UNAUTHORIZED, "INVALID_IDENTITY"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            ErrorKind::IssuerUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "ISSUER_UNAVAILABLE")
            }
            ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %self.0.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.0.message.clone(),
        };

        (status, Json(body)).into_response()
    }
}
