//! Error types for the federation API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::store::StoreError;

/// The identity providers the orchestrator can federate with.
///
/// A closed set: callback payloads naming anything else are rejected before
/// any network call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Github,
    Gitlab,
    Google,
    Discord,
    Spotify,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::Github,
        ProviderKind::Gitlab,
        ProviderKind::Google,
        ProviderKind::Discord,
        ProviderKind::Spotify,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Github => "github",
            ProviderKind::Gitlab => "gitlab",
            ProviderKind::Google => "google",
            ProviderKind::Discord => "discord",
            ProviderKind::Spotify => "spotify",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = FederationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(ProviderKind::Github),
            "gitlab" => Ok(ProviderKind::Gitlab),
            "google" => Ok(ProviderKind::Google),
            "discord" => Ok(ProviderKind::Discord),
            "spotify" => Ok(ProviderKind::Spotify),
            other => Err(FederationError::UnknownService {
                service: other.to_string(),
            }),
        }
    }
}

impl From<ProviderKind> for fluxo_auth::ConnectionType {
    fn from(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Github => fluxo_auth::ConnectionType::Github,
            ProviderKind::Gitlab => fluxo_auth::ConnectionType::Gitlab,
            ProviderKind::Google => fluxo_auth::ConnectionType::Google,
            ProviderKind::Discord => fluxo_auth::ConnectionType::Discord,
            ProviderKind::Spotify => fluxo_auth::ConnectionType::Spotify,
        }
    }
}

pub type FederationResult<T> = Result<T, FederationError>;

/// Errors surfaced by the federation flows.
///
/// Every attempt fails with exactly one of these; the JSON body carries the
/// client-facing reason while internals stay in the logs.
#[derive(Debug, thiserror::Error)]
pub enum FederationError {
    /// A gated route ran without the session gate attaching claims.
    #[error("No authentication token")]
    Unauthenticated,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("Invalid code authorization")]
    InvalidAuthorizationCode,

    #[error("Invalid app type")]
    InvalidAppType,

    #[error("Unknown service")]
    UnknownService { service: String },

    /// Authorization-code exchange with the provider failed.
    #[error("Failed to connect with requested service")]
    ExchangeFailed {
        provider: ProviderKind,
        status: Option<u16>,
    },

    /// Token exchange succeeded but the provider's user-info call failed or
    /// returned an unusable identity.
    #[error("Failed to connect with requested service")]
    IdentityFetchFailed { provider: ProviderKind },

    /// Persisting the link or the federated account failed.
    #[error("Failed to update token")]
    ReconciliationFailed(#[source] StoreError),

    #[error("Could not find requested user")]
    AccountLookup,

    #[error("Error creating token")]
    TokenIssuance,

    #[error("Failed to connect with requested service")]
    Http(#[from] reqwest::Error),
}

impl FederationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FederationError::Unauthenticated => StatusCode::UNAUTHORIZED,
            FederationError::InvalidBody
            | FederationError::InvalidAuthorizationCode
            | FederationError::InvalidAppType
            | FederationError::UnknownService { .. }
            | FederationError::AccountLookup => StatusCode::BAD_REQUEST,
            FederationError::ExchangeFailed { .. }
            | FederationError::IdentityFetchFailed { .. }
            | FederationError::ReconciliationFailed(_)
            | FederationError::TokenIssuance
            | FederationError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for FederationError {
    fn into_response(self) -> Response {
        match &self {
            FederationError::ExchangeFailed { provider, status } => {
                tracing::error!(%provider, ?status, "authorization code exchange failed");
            }
            FederationError::IdentityFetchFailed { provider } => {
                tracing::error!(%provider, "provider identity fetch failed");
            }
            FederationError::ReconciliationFailed(source) => {
                tracing::error!(error = %source, "account reconciliation failed");
            }
            FederationError::Http(source) => {
                tracing::error!(error = %source, "provider request failed");
            }
            FederationError::UnknownService { service } => {
                tracing::debug!(service, "callback named an unknown service");
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_round_trips_by_name() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_provider_kind_is_case_insensitive() {
        assert_eq!("GitHub".parse::<ProviderKind>().unwrap(), ProviderKind::Github);
    }

    #[test]
    fn test_unknown_provider_name_rejected() {
        let err = "slack".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, FederationError::UnknownService { .. }));
        assert_eq!(err.to_string(), "Unknown service");
    }

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(
            FederationError::InvalidAuthorizationCode.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FederationError::InvalidAppType.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_collaborator_errors_are_500() {
        assert_eq!(
            FederationError::ExchangeFailed {
                provider: ProviderKind::Github,
                status: Some(403),
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            FederationError::TokenIssuance.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
