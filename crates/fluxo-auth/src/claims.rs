//! Strongly-typed session claims.
//!
//! The credential carries exactly three facts: who the session belongs to
//! (`email`), how it was established (`connectionType`), and when it was
//! issued and expires. A token whose claims do not fit this shape fails at
//! decode; there is no loosely-typed claim map anywhere downstream.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// How the current session was established: basic password login or one of
/// the known identity providers.
///
/// This is a closed set. Adding a provider means adding a variant here and
/// a `ProviderClient` implementation in the federation crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Basic,
    Github,
    Gitlab,
    Google,
    Discord,
    Spotify,
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionType::Basic => "basic",
            ConnectionType::Github => "github",
            ConnectionType::Gitlab => "gitlab",
            ConnectionType::Google => "google",
            ConnectionType::Discord => "discord",
            ConnectionType::Spotify => "spotify",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for ConnectionType {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(ConnectionType::Basic),
            "github" => Ok(ConnectionType::Github),
            "gitlab" => Ok(ConnectionType::Gitlab),
            "google" => Ok(ConnectionType::Google),
            "discord" => Ok(ConnectionType::Discord),
            "spotify" => Ok(ConnectionType::Spotify),
            other => Err(AuthError::UnknownConnectionType(other.to_string())),
        }
    }
}

/// Claims embedded in the session credential.
///
/// Never mutated after creation — a refresh issues a new token. The
/// constructor guarantees `exp > iat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject email of the authenticated account.
    pub email: String,
    /// Identity provider (or `basic`) the session was established under.
    #[serde(rename = "connectionType")]
    pub connection_type: ConnectionType,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims valid for `ttl_secs` starting now.
    #[must_use]
    pub fn new(email: impl Into<String>, connection_type: ConnectionType, ttl_secs: i64) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            email: email.into(),
            connection_type,
            iat,
            exp: iat + ttl_secs.max(1),
        }
    }
}
