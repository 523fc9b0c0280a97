//! Portal Errors
//!
//! Every failed request becomes `{error: {code, message}, request_id}`.
//! Clinic backend failures surface as 502 `BACKEND_ERROR`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;
use crate::views::FormError;

/// Anything a portal handler can fail with
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or unknown session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad filter, status or form input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown appointment id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Clinic backend rejected or failed a request
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Listener or serialization failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Login refused because the backend health check failed
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Socket bind
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FormError> for ApiError {
    fn from(e: FormError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

/// JSON body of every non-2xx portal response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status and stable error code sent to the UI
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Backend(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        // 4xx at debug, backend refusals at warn, the rest at error
        if status.is_client_error() {
            tracing::debug!(request_id = %request_id, error_code = code, "{}", self);
        } else if let ApiError::Backend(BackendError::Status { status: upstream, .. }) = &self {
            tracing::warn!(
                request_id = %request_id,
                upstream_status = upstream,
                "Clinic backend refused request: {}",
                self
            );
        } else {
            tracing::error!(request_id = %request_id, error_code = code, "{}", self);
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Handler return type
pub type ApiResult<T> = Result<T, ApiError>;
