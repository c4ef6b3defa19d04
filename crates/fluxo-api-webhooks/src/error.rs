//! Error types for webhook admission.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::event::EvaluatorError;

/// Why a delivery was not admitted.
///
/// Senders get one flat rejection body; the variants exist for logs and
/// tests, not for the wire. Telling a sender *which* check failed would
/// leak what the gate looks at.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("no validator registered for service {0:?}")]
    UnknownService(String),

    #[error("payload rejected: {0}")]
    InvalidPayload(String),

    #[error("trigger evaluation failed")]
    Evaluator(#[from] EvaluatorError),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::UnknownService(_) | WebhookError::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            WebhookError::Evaluator(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            WebhookError::UnknownService(_) | WebhookError::InvalidPayload(_) => {
                "Invalid request body"
            }
            WebhookError::Evaluator(_) => "Internal server error",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match &self {
            WebhookError::Evaluator(source) => {
                tracing::error!(error = %source, "trigger evaluator failed");
            }
            other => {
                tracing::debug!(reason = %other, "webhook delivery rejected");
            }
        }

        let body = ErrorResponse {
            error: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
