//! In-memory account store.
//!
//! Backs both the credential store (basic auth) and the federation account
//! store. Accounts are keyed by `(email, connection type)`: the same email
//! reached through different providers is a different account, matching how
//! sessions are keyed. Passwords are hashed with Argon2id; federated
//! accounts carry no password at all.

use std::collections::HashMap;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fluxo_api_auth::{AccountInfo, CredentialStore, StoreError as AuthStoreError};
use fluxo_api_federation::{
    AccountStore, ExternalIdentity, ProviderKind, StoreError as FederationStoreError,
};
use fluxo_auth::ConnectionType;
use tokio::sync::RwLock;

struct UserRecord {
    /// Absent for federated accounts.
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
}

type AccountKey = (String, ConnectionType);

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<AccountKey, UserRecord>>,
    identities: RwLock<HashMap<(String, ConnectionType, ProviderKind), ExternalIdentity>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_password(password: &str) -> Result<String, AuthStoreError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthStoreError::Internal(e.to_string()))
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn register_basic(&self, email: &str, password: &str) -> Result<(), AuthStoreError> {
        let hash = Self::hash_password(password)?;

        let mut users = self.users.write().await;
        let key = (email.to_string(), ConnectionType::Basic);
        if users.contains_key(&key) {
            return Err(AuthStoreError::EmailTaken);
        }
        users.insert(
            key,
            UserRecord {
                password_hash: Some(hash),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn verify_password(&self, email: &str, password: &str) -> Result<(), AuthStoreError> {
        let users = self.users.read().await;
        let record = users
            .get(&(email.to_string(), ConnectionType::Basic))
            .ok_or(AuthStoreError::UserNotFound)?;
        let hash = record
            .password_hash
            .as_deref()
            .ok_or(AuthStoreError::WrongPassword)?;

        let parsed =
            PasswordHash::new(hash).map_err(|e| AuthStoreError::Internal(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthStoreError::WrongPassword)
    }

    async fn find_account(
        &self,
        email: &str,
        connection_type: ConnectionType,
    ) -> Result<AccountInfo, AuthStoreError> {
        let users = self.users.read().await;
        let record = users
            .get(&(email.to_string(), connection_type))
            .ok_or(AuthStoreError::UserNotFound)?;

        Ok(AccountInfo {
            email: email.to_string(),
            connection_type,
            created_at: record.created_at,
        })
    }

    async fn update_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthStoreError> {
        let new_hash = Self::hash_password(new_password)?;

        let mut users = self.users.write().await;
        let record = users
            .get_mut(&(email.to_string(), ConnectionType::Basic))
            .ok_or(AuthStoreError::UserNotFound)?;
        let hash = record
            .password_hash
            .as_deref()
            .ok_or(AuthStoreError::WrongPassword)?;

        let parsed =
            PasswordHash::new(hash).map_err(|e| AuthStoreError::Internal(e.to_string()))?;
        Argon2::default()
            .verify_password(old_password.as_bytes(), &parsed)
            .map_err(|_| AuthStoreError::WrongPassword)?;

        record.password_hash = Some(new_hash);
        Ok(())
    }

    async fn delete_account(
        &self,
        email: &str,
        connection_type: ConnectionType,
    ) -> Result<(), AuthStoreError> {
        let mut users = self.users.write().await;
        users
            .remove(&(email.to_string(), connection_type))
            .ok_or(AuthStoreError::UserNotFound)?;
        drop(users);

        // Linked identities go with the account.
        self.identities
            .write()
            .await
            .retain(|(e, c, _), _| !(e == email && *c == connection_type));
        Ok(())
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn find_or_create_account(
        &self,
        email: &str,
        provider: ProviderKind,
    ) -> Result<(), FederationStoreError> {
        let mut users = self.users.write().await;
        users
            .entry((email.to_string(), provider.into()))
            .or_insert_with(|| UserRecord {
                password_hash: None,
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn upsert_identity(
        &self,
        email: &str,
        connection_type: ConnectionType,
        identity: ExternalIdentity,
    ) -> Result<(), FederationStoreError> {
        let users = self.users.read().await;
        if !users.contains_key(&(email.to_string(), connection_type)) {
            return Err(FederationStoreError::AccountNotFound);
        }
        drop(users);

        self.identities.write().await.insert(
            (email.to_string(), connection_type, identity.provider),
            identity,
        );
        Ok(())
    }

    async fn is_linked(
        &self,
        email: &str,
        connection_type: ConnectionType,
        service: ProviderKind,
    ) -> Result<bool, FederationStoreError> {
        let users = self.users.read().await;
        if !users.contains_key(&(email.to_string(), connection_type)) {
            return Err(FederationStoreError::AccountNotFound);
        }

        Ok(self
            .identities
            .read()
            .await
            .contains_key(&(email.to_string(), connection_type, service)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_hashes_and_verifies() {
        let store = InMemoryStore::new();
        store.register_basic("a@b.c", "hunter2").await.unwrap();

        store.verify_password("a@b.c", "hunter2").await.unwrap();
        assert!(matches!(
            store.verify_password("a@b.c", "wrong").await,
            Err(AuthStoreError::WrongPassword)
        ));

        // The stored hash is not the plaintext.
        let users = store.users.read().await;
        let record = &users[&("a@b.c".to_string(), ConnectionType::Basic)];
        assert_ne!(record.password_hash.as_deref(), Some("hunter2"));
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let store = InMemoryStore::new();
        store.register_basic("a@b.c", "pw").await.unwrap();
        assert!(matches!(
            store.register_basic("a@b.c", "other").await,
            Err(AuthStoreError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_same_email_different_connection_is_a_different_account() {
        let store = InMemoryStore::new();
        store.register_basic("a@b.c", "pw").await.unwrap();
        store
            .find_or_create_account("a@b.c", ProviderKind::Github)
            .await
            .unwrap();

        store.find_account("a@b.c", ConnectionType::Basic).await.unwrap();
        store.find_account("a@b.c", ConnectionType::Github).await.unwrap();
        assert!(store.find_account("a@b.c", ConnectionType::Google).await.is_err());
    }

    #[tokio::test]
    async fn test_federated_account_has_no_password() {
        let store = InMemoryStore::new();
        store
            .find_or_create_account("a@b.c", ProviderKind::Github)
            .await
            .unwrap();

        // Basic login with that email still fails.
        assert!(matches!(
            store.verify_password("a@b.c", "anything").await,
            Err(AuthStoreError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_password_rehashes() {
        let store = InMemoryStore::new();
        store.register_basic("a@b.c", "old-pw").await.unwrap();

        store
            .update_password("a@b.c", "old-pw", "new-pw")
            .await
            .unwrap();

        assert!(matches!(
            store.verify_password("a@b.c", "old-pw").await,
            Err(AuthStoreError::WrongPassword)
        ));
        store.verify_password("a@b.c", "new-pw").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_password_checks_old_password() {
        let store = InMemoryStore::new();
        store.register_basic("a@b.c", "right").await.unwrap();

        assert!(matches!(
            store.update_password("a@b.c", "wrong", "new").await,
            Err(AuthStoreError::WrongPassword)
        ));
        assert!(matches!(
            store.update_password("ghost@b.c", "x", "y").await,
            Err(AuthStoreError::UserNotFound)
        ));

        // The original password still works after both failures.
        store.verify_password("a@b.c", "right").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_account_removes_account_and_identities() {
        let store = InMemoryStore::new();
        store.register_basic("a@b.c", "pw").await.unwrap();
        store
            .upsert_identity("a@b.c", ConnectionType::Basic, identity(ProviderKind::Github))
            .await
            .unwrap();

        store
            .delete_account("a@b.c", ConnectionType::Basic)
            .await
            .unwrap();

        assert!(matches!(
            store.find_account("a@b.c", ConnectionType::Basic).await,
            Err(AuthStoreError::UserNotFound)
        ));
        assert!(store.identities.read().await.is_empty());

        assert!(matches!(
            store.delete_account("a@b.c", ConnectionType::Basic).await,
            Err(AuthStoreError::UserNotFound)
        ));
    }

    fn identity(provider: ProviderKind) -> ExternalIdentity {
        ExternalIdentity {
            provider,
            provider_account_id: "acct-1".to_string(),
            access_token: "tok".to_string(),
            refresh_token: None,
            scope: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_identity_requires_existing_account() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store
                .upsert_identity("ghost@b.c", ConnectionType::Basic, identity(ProviderKind::Github))
                .await,
            Err(FederationStoreError::AccountNotFound)
        ));
    }

    #[tokio::test]
    async fn test_link_then_is_linked() {
        let store = InMemoryStore::new();
        store.register_basic("a@b.c", "pw").await.unwrap();

        assert!(!store
            .is_linked("a@b.c", ConnectionType::Basic, ProviderKind::Github)
            .await
            .unwrap());

        store
            .upsert_identity("a@b.c", ConnectionType::Basic, identity(ProviderKind::Github))
            .await
            .unwrap();

        assert!(store
            .is_linked("a@b.c", ConnectionType::Basic, ProviderKind::Github)
            .await
            .unwrap());
        assert!(!store
            .is_linked("a@b.c", ConnectionType::Basic, ProviderKind::Spotify)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_is_linked_for_unknown_account_fails() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store
                .is_linked("ghost@b.c", ConnectionType::Basic, ProviderKind::Github)
                .await,
            Err(FederationStoreError::AccountNotFound)
        ));
    }
}
