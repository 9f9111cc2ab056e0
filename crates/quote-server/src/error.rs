//! API error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use quote_core::ValidationError;
use quote_payments::GatewayError;

/// Errors a submission request surfaces to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("session creation failed: {0}")]
    Gateway(#[from] GatewayError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(ValidationError::MissingFields(fields)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "missing_fields", "fields": fields }),
            ),
            Self::Validation(ValidationError::AmountNotNumeric { got }) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid_amount_type", "got": got }),
            ),
            Self::Validation(ValidationError::AmountBelowMinimum { got }) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid_amount_min_50", "got": got }),
            ),
            Self::Gateway(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "create_session_failed", "detail": err.detail() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
