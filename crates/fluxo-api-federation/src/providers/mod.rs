//! Identity provider implementations.
//!
//! One module per provider, each speaking the provider's flavor of the
//! `OAuth2` authorization-code exchange and user-info lookup behind the
//! common [`ProviderClient`] trait.

pub mod discord;
pub mod github;
pub mod gitlab;
pub mod google;
pub mod spotify;

use std::collections::HashMap;
use std::sync::Arc;

pub use async_trait::async_trait;

use crate::error::{FederationError, FederationResult, ProviderKind};
use crate::models::AppType;

/// Result of a successful authorization-code exchange.
#[derive(Debug, Clone)]
pub struct TokenExchange {
    /// Access token for API calls.
    pub access_token: String,
    /// Refresh token, where the provider issues one.
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    pub expires_in: Option<i64>,
    /// Granted scopes as reported by the provider.
    pub scope: Option<String>,
}

/// The minimal identity the orchestrator needs from a provider.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// Stable account identifier at the provider.
    pub provider_account_id: String,
    /// Primary email, when the provider exposes one.
    pub email: Option<String>,
}

/// `OAuth2` client credentials and redirect URIs for one provider.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI registered for the browser frontend.
    pub redirect_uri_web: String,
    /// Redirect URI registered for the mobile app.
    pub redirect_uri_mobile: String,
}

impl ProviderCredentials {
    /// The redirect URI that was used in the authorization request; the
    /// exchange must repeat it verbatim or providers reject the code.
    pub fn redirect_uri(&self, app_type: AppType) -> &str {
        match app_type {
            AppType::Web => &self.redirect_uri_web,
            AppType::Mobile => &self.redirect_uri_mobile,
        }
    }
}

/// Trait for provider implementations.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Which provider this client speaks to.
    fn kind(&self) -> ProviderKind;

    /// Exchange an authorization code for tokens.
    ///
    /// `app_type` selects the redirect URI the code was issued against.
    async fn exchange_code(&self, code: &str, app_type: AppType)
        -> FederationResult<TokenExchange>;

    /// Fetch the identity behind an access token.
    async fn fetch_identity(&self, access_token: &str) -> FederationResult<ProviderIdentity>;
}

/// The set of providers this deployment is configured for.
///
/// Built once at startup from configuration; a provider name that parses
/// but is not registered here is still an unknown service.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn ProviderClient>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn ProviderClient>) {
        self.providers.insert(provider.kind(), provider);
    }

    #[must_use]
    pub fn with(mut self, provider: Arc<dyn ProviderClient>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> FederationResult<Arc<dyn ProviderClient>> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or_else(|| FederationError::UnknownService {
                service: kind.to_string(),
            })
    }

    #[must_use]
    pub fn is_registered(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }
}

pub use discord::DiscordProvider;
pub use github::GithubProvider;
pub use gitlab::GitlabProvider;
pub use google::GoogleProvider;
pub use spotify::SpotifyProvider;

#[cfg(test)]
mod tests {
    use super::*;

    struct NullProvider(ProviderKind);

    #[async_trait]
    impl ProviderClient for NullProvider {
        fn kind(&self) -> ProviderKind {
            self.0
        }

        async fn exchange_code(
            &self,
            _code: &str,
            _app_type: AppType,
        ) -> FederationResult<TokenExchange> {
            unimplemented!()
        }

        async fn fetch_identity(&self, _access_token: &str) -> FederationResult<ProviderIdentity> {
            unimplemented!()
        }
    }

    #[test]
    fn test_registry_resolves_registered_providers() {
        let registry =
            ProviderRegistry::new().with(Arc::new(NullProvider(ProviderKind::Github)));

        assert!(registry.is_registered(ProviderKind::Github));
        assert_eq!(
            registry.get(ProviderKind::Github).unwrap().kind(),
            ProviderKind::Github
        );
    }

    #[test]
    fn test_registry_treats_unconfigured_provider_as_unknown() {
        let registry = ProviderRegistry::new();

        assert!(!registry.is_registered(ProviderKind::Spotify));
        let Err(err) = registry.get(ProviderKind::Spotify) else {
            panic!("expected Err for unregistered provider");
        };
        assert!(matches!(err, FederationError::UnknownService { .. }));
    }
}
