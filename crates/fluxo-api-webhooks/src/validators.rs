//! Per-service payload validators.
//!
//! Each registered service gets a validator that knows that service's
//! delivery shape. Validation is structural only: does this look like a
//! delivery the named service would send. Trigger matching happens later,
//! behind the evaluator seam.

use axum::http::HeaderMap;
use serde_json::Value;

use crate::error::WebhookError;

/// Structural check for one service's deliveries.
pub trait PayloadValidator: Send + Sync {
    fn validate(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), WebhookError>;
}

fn parse_json(body: &[u8]) -> Result<Value, WebhookError> {
    serde_json::from_slice(body)
        .map_err(|e| WebhookError::InvalidPayload(format!("body is not JSON: {e}")))
}

/// GitHub deliveries: the event name rides in `X-Github-Event` and every
/// repository-scoped payload names its repository.
pub struct GithubWebhookValidator;

impl PayloadValidator for GithubWebhookValidator {
    fn validate(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), WebhookError> {
        let event = headers
            .get("X-Github-Event")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                WebhookError::InvalidPayload("missing X-Github-Event header".to_string())
            })?;

        // The ping GitHub sends on hook creation carries no repository
        // payload worth checking.
        if event == "ping" {
            return Ok(());
        }

        let payload = parse_json(body)?;
        match payload.pointer("/repository/name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => Ok(()),
            _ => Err(WebhookError::InvalidPayload(
                "missing repository name".to_string(),
            )),
        }
    }
}

/// GitLab deliveries: the event name rides in `X-Gitlab-Event` and the
/// payload carries a non-zero project id.
pub struct GitlabWebhookValidator;

impl PayloadValidator for GitlabWebhookValidator {
    fn validate(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), WebhookError> {
        headers
            .get("X-Gitlab-Event")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                WebhookError::InvalidPayload("missing X-Gitlab-Event header".to_string())
            })?;

        let payload = parse_json(body)?;
        match payload.pointer("/project/id").and_then(Value::as_i64) {
            Some(id) if id != 0 => Ok(()),
            _ => Err(WebhookError::InvalidPayload(
                "missing or zero project id".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: &'static str, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_github_push_with_repository_admitted() {
        let body = br#"{"repository":{"name":"fluxo"},"ref":"refs/heads/main"}"#;
        let result =
            GithubWebhookValidator.validate(&headers("X-Github-Event", "push"), body);
        assert!(result.is_ok());
    }

    #[test]
    fn test_github_ping_admitted_without_repository() {
        let result = GithubWebhookValidator.validate(
            &headers("X-Github-Event", "ping"),
            br#"{"zen":"Keep it logically awesome."}"#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_github_missing_event_header_rejected() {
        let result = GithubWebhookValidator
            .validate(&HeaderMap::new(), br#"{"repository":{"name":"fluxo"}}"#);
        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }

    #[test]
    fn test_github_empty_repository_name_rejected() {
        let result = GithubWebhookValidator.validate(
            &headers("X-Github-Event", "push"),
            br#"{"repository":{"name":""}}"#,
        );
        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }

    #[test]
    fn test_github_non_json_body_rejected() {
        let result =
            GithubWebhookValidator.validate(&headers("X-Github-Event", "push"), b"not json");
        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }

    #[test]
    fn test_gitlab_push_with_project_admitted() {
        let result = GitlabWebhookValidator.validate(
            &headers("X-Gitlab-Event", "Push Hook"),
            br#"{"project":{"id":77,"name":"fluxo"}}"#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_gitlab_zero_project_id_rejected() {
        let result = GitlabWebhookValidator.validate(
            &headers("X-Gitlab-Event", "Push Hook"),
            br#"{"project":{"id":0}}"#,
        );
        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }

    #[test]
    fn test_gitlab_missing_event_header_rejected() {
        let result =
            GitlabWebhookValidator.validate(&HeaderMap::new(), br#"{"project":{"id":77}}"#);
        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }
}
