//! Credential store collaborator interface.
//!
//! Account persistence and password hashing are external to this crate;
//! the handlers only ever talk to this trait. Implementations must make
//! account creation atomic per `(email, connection_type)` key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fluxo_auth::ConnectionType;
use serde::Serialize;
use thiserror::Error;

/// Errors reported by a credential store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("email address already used")]
    EmailTaken,

    #[error("storage failure: {0}")]
    Internal(String),
}

/// Public account facts returned to the authenticated caller.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub email: String,
    #[serde(rename = "connectionType")]
    pub connection_type: ConnectionType,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Persistence collaborator for password-based accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create a basic account. Fails with `EmailTaken` if the
    /// `(email, basic)` pair already exists.
    async fn register_basic(&self, email: &str, password: &str) -> Result<(), StoreError>;

    /// Verify a password login against the stored hash.
    async fn verify_password(&self, email: &str, password: &str) -> Result<(), StoreError>;

    /// Look up an account by its session identity.
    async fn find_account(
        &self,
        email: &str,
        connection_type: ConnectionType,
    ) -> Result<AccountInfo, StoreError>;

    /// Replace the stored password hash for a basic account after
    /// verifying the old password. Fails with `WrongPassword` when the
    /// old password does not match the stored hash.
    async fn update_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), StoreError>;

    /// Remove an account and everything keyed to it (linked identities
    /// included).
    async fn delete_account(
        &self,
        email: &str,
        connection_type: ConnectionType,
    ) -> Result<(), StoreError>;
}
