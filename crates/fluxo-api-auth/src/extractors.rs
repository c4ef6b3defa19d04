//! Axum extractors for authenticated handlers.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use fluxo_auth::SessionClaims;

use crate::error::AuthApiError;

/// The authenticated session, read from the claims the gate chain attached.
///
/// Handlers take this instead of poking at request extensions; using it on
/// a route that is not behind the gate chain is a wiring bug and rejects
/// with the same 401 the chain would have produced.
#[derive(Debug, Clone)]
pub struct Session(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AuthApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(Session)
            .ok_or(AuthApiError::NoToken)
    }
}
