//! Request and response shapes for the federation routes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FederationError, ProviderKind};

/// Which registered redirect URI the provider sent the user back through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppType {
    Web,
    Mobile,
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppType::Web => "web",
            AppType::Mobile => "mobile",
        })
    }
}

impl FromStr for AppType {
    type Err = FederationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(AppType::Web),
            "mobile" => Ok(AppType::Mobile),
            _ => Err(FederationError::InvalidAppType),
        }
    }
}

/// Whether a provider callback establishes a session or links an identity
/// to the one already established. Decided by the route, never inferred
/// from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Login,
    Link,
}

/// Raw callback body as sent by the frontend after the provider redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackBody {
    pub service: String,
    pub apptype: String,
}

/// Query string carried on the callback routes.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
}

/// A fully validated callback attempt.
#[derive(Debug, Clone)]
pub struct CallbackRequest {
    pub kind: CallbackKind,
    pub code: String,
    pub service: ProviderKind,
    pub app_type: AppType,
}

impl CallbackRequest {
    /// Validate the raw pieces of a callback, in a fixed order: the
    /// authorization code must be non-empty, then the app type must be
    /// recognized, then the service name must name a known provider. The
    /// first failing check is the reported reason.
    pub fn from_parts(
        kind: CallbackKind,
        code: Option<String>,
        body: &CallbackBody,
    ) -> Result<Self, FederationError> {
        let code = match code {
            Some(code) if !code.is_empty() => code,
            _ => return Err(FederationError::InvalidAuthorizationCode),
        };
        let app_type = body.apptype.parse::<AppType>()?;
        let service = body.service.parse::<ProviderKind>()?;

        Ok(CallbackRequest {
            kind,
            code,
            service,
            app_type,
        })
    }
}

/// Query string for the link status route.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: &'static str,
}

impl SuccessResponse {
    #[must_use]
    pub fn new(success: &'static str) -> Self {
        Self { success }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(service: &str, apptype: &str) -> CallbackBody {
        CallbackBody {
            service: service.to_string(),
            apptype: apptype.to_string(),
        }
    }

    #[test]
    fn test_valid_callback_parses() {
        let request = CallbackRequest::from_parts(
            CallbackKind::Login,
            Some("abc123".to_string()),
            &body("github", "web"),
        )
        .unwrap();

        assert_eq!(request.kind, CallbackKind::Login);
        assert_eq!(request.code, "abc123");
        assert_eq!(request.service, ProviderKind::Github);
        assert_eq!(request.app_type, AppType::Web);
    }

    #[test]
    fn test_missing_or_empty_code_rejected() {
        for code in [None, Some(String::new())] {
            let err =
                CallbackRequest::from_parts(CallbackKind::Login, code, &body("github", "web"))
                    .unwrap_err();
            assert!(matches!(err, FederationError::InvalidAuthorizationCode));
        }
    }

    #[test]
    fn test_code_checked_before_app_type() {
        // Both the code and the app type are bad; the code wins.
        let err = CallbackRequest::from_parts(CallbackKind::Login, None, &body("github", "tv"))
            .unwrap_err();
        assert!(matches!(err, FederationError::InvalidAuthorizationCode));
    }

    #[test]
    fn test_app_type_checked_before_service() {
        let err = CallbackRequest::from_parts(
            CallbackKind::Link,
            Some("abc".to_string()),
            &body("slack", "tv"),
        )
        .unwrap_err();
        assert!(matches!(err, FederationError::InvalidAppType));
    }

    #[test]
    fn test_unknown_service_rejected_last() {
        let err = CallbackRequest::from_parts(
            CallbackKind::Link,
            Some("abc".to_string()),
            &body("slack", "mobile"),
        )
        .unwrap_err();
        assert!(matches!(err, FederationError::UnknownService { .. }));
    }
}
