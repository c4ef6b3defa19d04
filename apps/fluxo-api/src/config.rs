//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be present
//! and valid or the application exits with a clear error message.

use std::env;
use std::fmt;
use std::str::FromStr;

use fluxo_api_federation::{ProviderCredentials, ProviderKind};
use thiserror::Error;

/// Default SESSION_SECRET, for development only. Production startup is
/// refused while this value is in effect.
pub const INSECURE_SESSION_SECRET: &str = "development-session-secret-change-in-production";

/// Application environment mode.
///
/// Controls security enforcement: in `Development` insecure defaults are
/// allowed with a warning; in `Production` they refuse startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Parse from the `APP_ENV` environment variable value. Defaults to
    /// `Development` if unset or unrecognized.
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => {
                tracing::warn!(
                    value = other,
                    "Unrecognized APP_ENV value, defaulting to Development"
                );
                Self::Development
            }
        }
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// All runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: AppEnvironment,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Origin allowed to make credentialed cross-site requests.
    pub frontend_origin: String,
    pub session_secret: String,
    pub session_ttl_secs: i64,
    /// Providers with credentials configured; the rest stay unregistered.
    pub providers: Vec<(ProviderKind, ProviderCredentials)>,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_env =
            AppEnvironment::from_env_str(&env::var("APP_ENV").unwrap_or_default());

        Ok(Config {
            app_env,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| INSECURE_SESSION_SECRET.to_string()),
            session_ttl_secs: parse_var("SESSION_TTL_SECS", 3600)?,
            providers: load_providers(),
        })
    }

    /// Check for insecure defaults. Returns warnings in development;
    /// errors (which must abort startup) in production.
    pub fn validate_security_config(&self) -> Result<Vec<String>, Vec<String>> {
        let mut findings = Vec::new();
        if self.session_secret == INSECURE_SESSION_SECRET {
            findings
                .push("SESSION_SECRET is the insecure default value".to_string());
        }

        if self.app_env.is_production() && !findings.is_empty() {
            Err(findings)
        } else {
            Ok(findings)
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => {
            value.parse().map_err(|_| ConfigError::Invalid { name, value })
        }
        _ => Ok(default),
    }
}

/// Read one provider's `OAuth2` credentials from `{PREFIX}_CLIENT_ID` etc.
/// Returns `None` when the provider is not configured; the mobile redirect
/// falls back to the web one.
fn provider_credentials(prefix: &str) -> Option<ProviderCredentials> {
    let var = |suffix: &str| {
        env::var(format!("{prefix}_{suffix}"))
            .ok()
            .filter(|v| !v.is_empty())
    };

    let client_id = var("CLIENT_ID")?;
    let client_secret = var("CLIENT_SECRET")?;
    let redirect_uri_web = var("REDIRECT_URI_WEB")?;
    let redirect_uri_mobile = var("REDIRECT_URI_MOBILE").unwrap_or_else(|| redirect_uri_web.clone());

    Some(ProviderCredentials {
        client_id,
        client_secret,
        redirect_uri_web,
        redirect_uri_mobile,
    })
}

fn load_providers() -> Vec<(ProviderKind, ProviderCredentials)> {
    ProviderKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let prefix = kind.as_str().to_uppercase();
            provider_credentials(&prefix).map(|credentials| (kind, credentials))
        })
        .collect()
}
