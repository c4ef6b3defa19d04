//! Spotify `OAuth2` provider implementation.

use reqwest::Client;
use serde::Deserialize;

use super::{async_trait, ProviderClient, ProviderCredentials, ProviderIdentity, TokenExchange};
use crate::error::{FederationError, FederationResult, ProviderKind};
use crate::models::AppType;

/// Spotify `OAuth2` endpoints.
const TOKEN_ENDPOINT: &str = "https://accounts.spotify.com/api/token";
const USERINFO_ENDPOINT: &str = "https://api.spotify.com/v1/me";

#[derive(Debug, Deserialize)]
struct SpotifyTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

/// Spotify profile; `email` requires the `user-read-email` scope.
#[derive(Debug, Deserialize)]
struct SpotifyUserInfo {
    id: String,
    email: Option<String>,
}

/// Spotify `OAuth2` provider.
#[derive(Clone)]
pub struct SpotifyProvider {
    credentials: ProviderCredentials,
    http_client: Client,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl SpotifyProvider {
    /// Create a new Spotify provider.
    #[must_use]
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self {
            credentials,
            http_client: Client::new(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: USERINFO_ENDPOINT.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoints(
        mut self,
        token_endpoint: impl Into<String>,
        userinfo_endpoint: impl Into<String>,
    ) -> Self {
        self.token_endpoint = token_endpoint.into();
        self.userinfo_endpoint = userinfo_endpoint.into();
        self
    }
}

#[async_trait]
impl ProviderClient for SpotifyProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Spotify
    }

    async fn exchange_code(
        &self,
        code: &str,
        app_type: AppType,
    ) -> FederationResult<TokenExchange> {
        // Spotify wants client authentication via HTTP basic auth.
        let params = [
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.credentials.redirect_uri(app_type)),
        ];

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FederationError::ExchangeFailed {
                provider: ProviderKind::Spotify,
                status: Some(status.as_u16()),
            });
        }

        let token_response: SpotifyTokenResponse = response.json().await?;

        Ok(TokenExchange {
            access_token: token_response.access_token,
            refresh_token: token_response.refresh_token,
            expires_in: token_response.expires_in,
            scope: token_response.scope,
        })
    }

    async fn fetch_identity(&self, access_token: &str) -> FederationResult<ProviderIdentity> {
        let response = self
            .http_client
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FederationError::IdentityFetchFailed {
                provider: ProviderKind::Spotify,
            });
        }

        let user_info: SpotifyUserInfo = response.json().await?;

        Ok(ProviderIdentity {
            provider_account_id: user_info.id,
            email: user_info.email,
        })
    }
}
