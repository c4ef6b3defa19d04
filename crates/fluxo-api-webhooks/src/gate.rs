//! The admission gate.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use bytes::Bytes;

use crate::error::WebhookError;
use crate::event::{TriggerEvaluator, WebhookEvent};
use crate::validators::{GithubWebhookValidator, GitlabWebhookValidator, PayloadValidator};

/// Decides, per service, whether a delivery enters the platform.
///
/// An event crosses the gate exactly once: either it is rejected here or
/// it is handed to the evaluator; there is no retry path.
pub struct AdmissionGate {
    validators: HashMap<String, Box<dyn PayloadValidator>>,
    evaluator: Arc<dyn TriggerEvaluator>,
}

impl AdmissionGate {
    /// Gate with the built-in validators registered.
    pub fn new(evaluator: Arc<dyn TriggerEvaluator>) -> Self {
        let mut gate = Self::empty(evaluator);
        gate.register("github", Box::new(GithubWebhookValidator));
        gate.register("gitlab", Box::new(GitlabWebhookValidator));
        gate
    }

    /// Gate with no validators; every service starts unknown.
    pub fn empty(evaluator: Arc<dyn TriggerEvaluator>) -> Self {
        Self {
            validators: HashMap::new(),
            evaluator,
        }
    }

    /// Register (or replace) the validator for a service name.
    pub fn register(&mut self, service: &str, validator: Box<dyn PayloadValidator>) {
        self.validators
            .insert(service.to_ascii_lowercase(), validator);
    }

    /// Admit or reject one delivery.
    pub async fn admit(
        &self,
        service: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<(), WebhookError> {
        let service = service.to_ascii_lowercase();

        let validator = self
            .validators
            .get(&service)
            .ok_or_else(|| WebhookError::UnknownService(service.clone()))?;

        validator.validate(&headers, &body)?;

        tracing::info!(%service, bytes = body.len(), "webhook admitted");
        self.evaluator
            .evaluate(WebhookEvent {
                service,
                headers,
                body,
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EvaluatorError;
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingEvaluator {
        events: Mutex<Vec<WebhookEvent>>,
        fail: bool,
    }

    #[async_trait]
    impl TriggerEvaluator for RecordingEvaluator {
        async fn evaluate(&self, event: WebhookEvent) -> Result<(), EvaluatorError> {
            if self.fail {
                return Err(EvaluatorError("engine unavailable".to_string()));
            }
            self.events.lock().await.push(event);
            Ok(())
        }
    }

    fn github_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("X-Github-Event", HeaderValue::from_static("push"));
        headers
    }

    #[tokio::test]
    async fn test_admitted_event_reaches_evaluator_verbatim() {
        let evaluator = Arc::new(RecordingEvaluator::default());
        let gate = AdmissionGate::new(evaluator.clone());
        let body = Bytes::from_static(br#"{"repository":{"name":"fluxo"}}"#);

        gate.admit("github", github_headers(), body.clone())
            .await
            .unwrap();

        let events = evaluator.events.lock().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].service, "github");
        assert_eq!(events[0].body, body);
    }

    #[tokio::test]
    async fn test_service_name_is_case_insensitive() {
        let evaluator = Arc::new(RecordingEvaluator::default());
        let gate = AdmissionGate::new(evaluator.clone());

        gate.admit(
            "GitHub",
            github_headers(),
            Bytes::from_static(br#"{"repository":{"name":"fluxo"}}"#),
        )
        .await
        .unwrap();

        assert_eq!(evaluator.events.lock().await[0].service, "github");
    }

    #[tokio::test]
    async fn test_unknown_service_never_reaches_evaluator() {
        let evaluator = Arc::new(RecordingEvaluator::default());
        let gate = AdmissionGate::new(evaluator.clone());

        let err = gate
            .admit("slack", HeaderMap::new(), Bytes::from_static(b"{}"))
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::UnknownService(_)));
        assert!(evaluator.events.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_payload_never_reaches_evaluator() {
        let evaluator = Arc::new(RecordingEvaluator::default());
        let gate = AdmissionGate::new(evaluator.clone());

        let err = gate
            .admit("github", HeaderMap::new(), Bytes::from_static(b"{}"))
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::InvalidPayload(_)));
        assert!(evaluator.events.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_evaluator_failure_surfaces() {
        let evaluator = Arc::new(RecordingEvaluator {
            fail: true,
            ..Default::default()
        });
        let gate = AdmissionGate::new(evaluator);

        let err = gate
            .admit(
                "github",
                github_headers(),
                Bytes::from_static(br#"{"repository":{"name":"fluxo"}}"#),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::Evaluator(_)));
    }
}
