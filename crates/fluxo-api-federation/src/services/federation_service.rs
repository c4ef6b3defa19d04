//! The federation orchestrator.
//!
//! Walks a validated callback through exchange, identity fetch, and
//! account reconciliation. The two flows share the first two steps and
//! diverge at reconciliation:
//!
//! * login: find-or-create the account keyed by `(email, provider)` and
//!   mint a fresh session credential;
//! * link: attach the provider identity to the account named by the
//!   *current session's* claims, and leave the session alone.

use std::sync::Arc;

use fluxo_auth::{SessionClaims, TokenCodec};

use crate::error::{FederationError, FederationResult, ProviderKind};
use crate::models::CallbackRequest;
use crate::providers::ProviderRegistry;
use crate::store::{AccountStore, ExternalIdentity, StoreError};

/// Orchestrates federated login and account linking.
pub struct FederationService {
    registry: Arc<ProviderRegistry>,
    store: Arc<dyn AccountStore>,
    codec: Arc<TokenCodec>,
    session_ttl_secs: i64,
}

impl FederationService {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        store: Arc<dyn AccountStore>,
        codec: Arc<TokenCodec>,
        session_ttl_secs: i64,
    ) -> Self {
        Self {
            registry,
            store,
            codec,
            session_ttl_secs,
        }
    }

    /// Session and cookie lifetime granted to federated logins.
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }

    /// Complete a federated login: the caller holds no session, the
    /// provider vouches for an email, and a new session credential is
    /// minted for it.
    pub async fn login(&self, request: &CallbackRequest) -> FederationResult<String> {
        let provider = self.registry.get(request.service)?;

        let tokens = provider
            .exchange_code(&request.code, request.app_type)
            .await?;
        let identity = provider.fetch_identity(&tokens.access_token).await?;

        // A login needs an addressable subject; an identity the provider
        // will not attach an email to cannot become a session.
        let email = identity.email.ok_or(FederationError::IdentityFetchFailed {
            provider: request.service,
        })?;

        self.store
            .find_or_create_account(&email, request.service)
            .await
            .map_err(FederationError::ReconciliationFailed)?;

        tracing::info!(provider = %request.service, "federated login reconciled");

        let claims = SessionClaims::new(&email, request.service.into(), self.session_ttl_secs);
        self.codec
            .issue(&claims)
            .map_err(|_| FederationError::TokenIssuance)
    }

    /// Attach a provider identity to the account the session claims name.
    /// Never mints or refreshes the session credential.
    pub async fn link(
        &self,
        request: &CallbackRequest,
        claims: &SessionClaims,
    ) -> FederationResult<()> {
        let provider = self.registry.get(request.service)?;

        let tokens = provider
            .exchange_code(&request.code, request.app_type)
            .await?;
        let identity = provider.fetch_identity(&tokens.access_token).await?;

        let external = ExternalIdentity {
            provider: request.service,
            provider_account_id: identity.provider_account_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            scope: tokens.scope,
        };

        self.store
            .upsert_identity(&claims.email, claims.connection_type, external)
            .await
            .map_err(FederationError::ReconciliationFailed)?;

        tracing::info!(provider = %request.service, "provider identity linked");
        Ok(())
    }

    /// Whether the session's account already carries an identity for
    /// `service`. Read-only.
    pub async fn authentication_status(
        &self,
        claims: &SessionClaims,
        service: &str,
    ) -> FederationResult<bool> {
        let kind: ProviderKind = service.parse()?;
        // Same closed set as the callbacks: unconfigured is unknown.
        let provider = self.registry.get(kind)?;

        self.store
            .is_linked(&claims.email, claims.connection_type, provider.kind())
            .await
            .map_err(|e| match e {
                StoreError::AccountNotFound => FederationError::AccountLookup,
                other => FederationError::ReconciliationFailed(other),
            })
    }
}
