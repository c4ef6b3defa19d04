//! Admitted webhook events and the workflow-engine seam.

use axum::http::HeaderMap;
use bytes::Bytes;

use async_trait::async_trait;

/// A delivery that passed admission, exactly as received.
///
/// The raw body is kept verbatim; downstream trigger matching may care
/// about fields the validator never looked at.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Registered service name, lowercased.
    pub service: String,
    /// All delivery headers.
    pub headers: HeaderMap,
    /// Raw request body.
    pub body: Bytes,
}

/// Failure reported by the workflow engine while evaluating triggers.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct EvaluatorError(pub String);

/// The workflow engine's side of the gate.
///
/// Admission does not wait for workflows to run; implementations should
/// enqueue and return. An error here means the event was admitted but
/// could not be handed over.
#[async_trait]
pub trait TriggerEvaluator: Send + Sync {
    async fn evaluate(&self, event: WebhookEvent) -> Result<(), EvaluatorError>;
}
