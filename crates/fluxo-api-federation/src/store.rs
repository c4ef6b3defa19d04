//! Persistence seam for federated accounts and linked identities.

use async_trait::async_trait;
use fluxo_auth::ConnectionType;

use crate::error::ProviderKind;

/// Failures reported by the account store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("account not found")]
    AccountNotFound,
    #[error("storage failure: {0}")]
    Internal(String),
}

/// A provider identity linked to a local account, together with the
/// material needed to act on the user's behalf later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub provider: ProviderKind,
    pub provider_account_id: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

/// Account reconciliation collaborator.
///
/// The orchestrator never touches storage directly; implementations decide
/// where accounts and identities live.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find the account keyed by `(email, provider)`, creating it if this
    /// is the first time that identity logs in. Must be atomic: two
    /// concurrent first logins yield one account.
    async fn find_or_create_account(
        &self,
        email: &str,
        provider: ProviderKind,
    ) -> Result<(), StoreError>;

    /// Attach or refresh a provider identity on an existing account.
    /// The session owner is identified by the claims pair, not by anything
    /// in the identity payload.
    async fn upsert_identity(
        &self,
        email: &str,
        connection_type: ConnectionType,
        identity: ExternalIdentity,
    ) -> Result<(), StoreError>;

    /// Whether the account already carries an identity for `service`.
    async fn is_linked(
        &self,
        email: &str,
        connection_type: ConnectionType,
        service: ProviderKind,
    ) -> Result<bool, StoreError>;
}
