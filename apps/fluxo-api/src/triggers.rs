//! Trigger evaluator wiring.

use async_trait::async_trait;
use fluxo_api_webhooks::{EvaluatorError, TriggerEvaluator, WebhookEvent};

/// Evaluator that records admitted events and drops them.
///
/// Stands in until the workflow engine consumes events directly; admission
/// semantics (what gets through, what gets rejected) are unaffected by the
/// events going nowhere.
pub struct LoggingTriggerEvaluator;

#[async_trait]
impl TriggerEvaluator for LoggingTriggerEvaluator {
    async fn evaluate(&self, event: WebhookEvent) -> Result<(), EvaluatorError> {
        tracing::info!(
            service = %event.service,
            bytes = event.body.len(),
            "webhook event handed to trigger evaluation"
        );
        Ok(())
    }
}
