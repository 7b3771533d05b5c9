//! JSON error envelope and the extractor that produces it for bad bodies.
//!
//! Every failure leaves the API as `{"error": {"code": "...", "message": "..."}}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use packing_types::PackingError;

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", "not found")
    }
}

impl From<PackingError> for ApiError {
    fn from(err: PackingError) -> Self {
        let status = match err {
            PackingError::InvalidAmount | PackingError::InvalidPackSizes { .. } => {
                StatusCode::BAD_REQUEST
            },
            PackingError::AmountTooLarge { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PackingError::PackSizesNotConfigured
            | PackingError::Conflict
            | PackingError::VersionConflict { .. } => StatusCode::CONFLICT,
            PackingError::CouldNotCalculate | PackingError::Store { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };

        // Store details stay in the logs.
        let message = if status.is_server_error() {
            tracing::error!(error = %err, code = err.code(), "Request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            err.to_string()
        };

        Self { status, code: err.code(), message }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::new(status, "INVALID_REQUEST", "invalid request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope { error: ErrorBody { code: self.code, message: &self.message } };
        (self.status, Json(body)).into_response()
    }
}

/// `Json` whose rejections use the API error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}
