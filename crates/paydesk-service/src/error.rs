//! API error types and responses.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use paydesk_core::PaydeskError;
use paydesk_store::StoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The card was charged but not debited.
    #[error("payment required: {0}")]
    PaymentRequired(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// External service error.
    #[error("external service error: {0}")]
    ExternalService(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            Self::PaymentRequired(msg) => (StatusCode::PAYMENT_REQUIRED, "card_not_debited", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            Self::ExternalService(msg) => {
                (StatusCode::BAD_GATEWAY, "external_service_error", msg)
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<PaydeskError> for ApiError {
    fn from(err: PaydeskError) -> Self {
        let message = err.to_string();
        match err {
            PaydeskError::InvalidPhoneNumber { .. }
            | PaydeskError::UnsupportedCurrency { .. }
            | PaydeskError::UnknownCurrency { .. }
            | PaydeskError::InvalidCustomer(_)
            | PaydeskError::InvalidAmount(_)
            | PaydeskError::InvalidId(_) => Self::BadRequest(message),
            PaydeskError::PhoneNumberTaken { .. } | PaydeskError::Duplicate(_) => {
                Self::Conflict(message)
            }
            PaydeskError::CustomerNotFound { .. } => Self::NotFound(message),
            PaydeskError::CardNotDebited { .. } => Self::PaymentRequired(message),
            PaydeskError::ChargeFailed { .. } => Self::ExternalService(message),
            PaydeskError::Storage(_) => Self::Internal(message),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            other => PaydeskError::from(other).into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
