//! Google `OAuth2` provider implementation.

use reqwest::Client;
use serde::Deserialize;

use super::{async_trait, ProviderClient, ProviderCredentials, ProviderIdentity, TokenExchange};
use crate::error::{FederationError, FederationResult, ProviderKind};
use crate::models::AppType;

/// Google `OAuth2` endpoints.
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

/// OIDC userinfo; `sub` is the stable account identifier.
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    email: Option<String>,
}

/// Google `OAuth2` provider.
#[derive(Clone)]
pub struct GoogleProvider {
    credentials: ProviderCredentials,
    http_client: Client,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl GoogleProvider {
    /// Create a new Google provider.
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
impl ProviderClient for GoogleProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    async fn exchange_code(
        &self,
        code: &str,
        app_type: AppType,
    ) -> FederationResult<TokenExchange> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.credentials.redirect_uri(app_type)),
        ];

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FederationError::ExchangeFailed {
                provider: ProviderKind::Google,
                status: Some(status.as_u16()),
            });
        }

        let token_response: GoogleTokenResponse = response.json().await?;

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
                provider: ProviderKind::Google,
            });
        }

        let user_info: GoogleUserInfo = response.json().await?;

        Ok(ProviderIdentity {
            provider_account_id: user_info.sub,
            email: user_info.email,
        })
    }
}
