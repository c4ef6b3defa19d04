//! Axum extractors for the gated federation routes.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use fluxo_auth::SessionClaims;

use crate::error::FederationError;

/// The authenticated session, read from the claims the session gate
/// attached to the request.
#[derive(Debug, Clone)]
pub struct Session(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = FederationError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(Session)
            .ok_or(FederationError::Unauthenticated)
    }
}
