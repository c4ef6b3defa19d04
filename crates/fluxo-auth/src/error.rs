//! Error types for session credential operations.

use thiserror::Error;

/// Authentication error types.
///
/// Each variant maps to a specific failure mode when issuing or verifying
/// a session credential.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Token has expired (exp claim is in the past).
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature is invalid.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token format is malformed or the claims do not decode.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token uses an unsupported algorithm (only HS256 is allowed).
    #[error("Unsupported algorithm: only HS256 is allowed")]
    UnsupportedAlgorithm,

    /// Required claim is missing from the token.
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// Connection type is not one of the known identity providers or `basic`.
    #[error("Unknown connection type: {0}")]
    UnknownConnectionType(String),

    /// Signing key is unusable. Issuing only; process-level misconfiguration.
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::TokenExpired.to_string(), "Token has expired");
        assert_eq!(
            AuthError::InvalidSignature.to_string(),
            "Invalid token signature"
        );
        assert_eq!(
            AuthError::InvalidToken("bad base64".to_string()).to_string(),
            "Invalid token: bad base64"
        );
        assert_eq!(
            AuthError::UnknownConnectionType("slack".to_string()).to_string(),
            "Unknown connection type: slack"
        );
    }
}
