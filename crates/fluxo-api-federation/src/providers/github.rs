//! GitHub `OAuth2` provider implementation.

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use super::{async_trait, ProviderClient, ProviderCredentials, ProviderIdentity, TokenExchange};
use crate::error::{FederationError, FederationResult, ProviderKind};
use crate::models::AppType;

/// GitHub `OAuth2` endpoints.
const TOKEN_ENDPOINT: &str = "https://github.com/login/oauth/access_token";
const USERINFO_ENDPOINT: &str = "https://api.github.com/user";
const USER_EMAILS_ENDPOINT: &str = "https://api.github.com/user/emails";

/// GitHub token response.
#[derive(Debug, Deserialize)]
struct GithubTokenResponse {
    access_token: String,
    scope: Option<String>,
}

/// GitHub userinfo response.
#[derive(Debug, Deserialize)]
struct GithubUserInfo {
    id: i64,
    email: Option<String>,
}

/// GitHub email entry (for getting the verified primary email).
#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// GitHub `OAuth2` provider.
#[derive(Clone)]
pub struct GithubProvider {
    credentials: ProviderCredentials,
    http_client: Client,
    token_endpoint: String,
    userinfo_endpoint: String,
    user_emails_endpoint: String,
}

impl GithubProvider {
    /// Create a new GitHub provider.
    #[must_use]
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self {
            credentials,
            http_client: Client::new(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: USERINFO_ENDPOINT.to_string(),
            user_emails_endpoint: USER_EMAILS_ENDPOINT.to_string(),
        }
    }

    /// Point the provider at a different API origin. Used to run against
    /// GitHub Enterprise or a local stand-in.
    #[must_use]
    pub fn with_endpoints(
        mut self,
        token_endpoint: impl Into<String>,
        userinfo_endpoint: impl Into<String>,
        user_emails_endpoint: impl Into<String>,
    ) -> Self {
        self.token_endpoint = token_endpoint.into();
        self.userinfo_endpoint = userinfo_endpoint.into();
        self.user_emails_endpoint = user_emails_endpoint.into();
        self
    }

    /// Fetch the primary verified email, falling back to any verified one.
    async fn fetch_primary_email(&self, access_token: &str) -> FederationResult<Option<String>> {
        let response = self
            .http_client
            .get(&self.user_emails_endpoint)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "fluxo")
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "GitHub emails endpoint failed, falling back to profile email");
            return Ok(None);
        }

        let emails: Vec<GithubEmail> = response.json().await?;

        let email = emails
            .iter()
            .find(|e| e.primary && e.verified)
            .or_else(|| emails.iter().find(|e| e.verified))
            .map(|e| e.email.clone());

        Ok(email)
    }
}

#[async_trait]
impl ProviderClient for GithubProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Github
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
            ("redirect_uri", self.credentials.redirect_uri(app_type)),
        ];

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FederationError::ExchangeFailed {
                provider: ProviderKind::Github,
                status: Some(status.as_u16()),
            });
        }

        let token_response: GithubTokenResponse = response.json().await?;

        Ok(TokenExchange {
            access_token: token_response.access_token,
            refresh_token: None, // GitHub doesn't return refresh tokens
            expires_in: None,    // GitHub tokens don't expire (unless revoked)
            scope: token_response.scope,
        })
    }

    async fn fetch_identity(&self, access_token: &str) -> FederationResult<ProviderIdentity> {
        let response = self
            .http_client
            .get(&self.userinfo_endpoint)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "fluxo")
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FederationError::IdentityFetchFailed {
                provider: ProviderKind::Github,
            });
        }

        let user_info: GithubUserInfo = response.json().await?;

        // The profile email is often null; the emails endpoint is the
        // reliable source.
        let email = match user_info.email {
            Some(email) => Some(email),
            None => self.fetch_primary_email(access_token).await?,
        };

        Ok(ProviderIdentity {
            provider_account_id: user_info.id.to_string(),
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ProviderCredentials {
        ProviderCredentials {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri_web: "https://example.com/callback".to_string(),
            redirect_uri_mobile: "fluxo://callback".to_string(),
        }
    }

    #[test]
    fn test_provider_kind() {
        let provider = GithubProvider::new(credentials());
        assert_eq!(provider.kind(), ProviderKind::Github);
    }

    #[test]
    fn test_redirect_uri_follows_app_type() {
        let credentials = credentials();
        assert_eq!(
            credentials.redirect_uri(AppType::Web),
            "https://example.com/callback"
        );
        assert_eq!(credentials.redirect_uri(AppType::Mobile), "fluxo://callback");
    }

    #[test]
    fn test_endpoints_can_be_overridden() {
        let provider = GithubProvider::new(credentials()).with_endpoints(
            "http://localhost:9999/token",
            "http://localhost:9999/user",
            "http://localhost:9999/emails",
        );
        assert_eq!(provider.token_endpoint, "http://localhost:9999/token");
    }
}
