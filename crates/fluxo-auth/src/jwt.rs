//! Session credential codec: HS256 signing and verification.
//!
//! The codec is a pure function of token + secret. The accepted algorithm
//! is pinned to HS256 before verification — a token announcing `none` or an
//! asymmetric algorithm in its own header is rejected outright, closing the
//! classic algorithm-downgrade forgery.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::SessionClaims;
use crate::error::AuthError;

/// Clock-skew tolerance applied to `exp`, in seconds.
const LEEWAY_SECS: u64 = 60;

/// Issues and verifies signed session credentials.
///
/// Constructed once with the signing secret and shared across requests.
/// Distinct codecs (e.g. per test) simply carry distinct secrets.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec for the given symmetric secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        // Only HS256; anything else fails before signature verification.
        validation.algorithms = vec![Algorithm::HS256];
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encode claims into a signed token string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidKey` only when signing itself fails, which
    /// indicates process-level misconfiguration rather than bad input.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidKey(format!("Signing failed: {e}")))
    }

    /// Decode and validate a token, returning the typed claims.
    ///
    /// # Errors
    ///
    /// - `AuthError::TokenExpired` — `exp` is in the past (beyond leeway)
    /// - `AuthError::InvalidSignature` — signature does not match the secret
    /// - `AuthError::UnsupportedAlgorithm` — token header declares a
    ///   different algorithm
    /// - `AuthError::InvalidToken` — malformed token or claim shape
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys intentionally omitted.
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::UnsupportedAlgorithm,
        ErrorKind::InvalidToken => AuthError::InvalidToken("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::InvalidToken("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::InvalidToken("Invalid claims shape".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.to_string()),
        _ => AuthError::InvalidToken(format!("Token validation failed: {err}")),
    }
}
