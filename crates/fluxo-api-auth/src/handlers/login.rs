//! Basic login handler: password check, credential minting, cookie grant.

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use fluxo_auth::{grant_session_cookie, ConnectionType, SessionClaims};
use tracing::info;

use crate::error::AuthApiError;
use crate::models::{SuccessResponse, UserCredentials};
use crate::router::AuthState;

/// `POST /login` — authenticate with email + password and set the session
/// cookie.
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    body: Result<Json<UserCredentials>, JsonRejection>,
) -> Result<(CookieJar, Json<SuccessResponse>), AuthApiError> {
    let Json(credentials) = body.map_err(|_| AuthApiError::InvalidBody)?;

    state
        .store
        .verify_password(&credentials.email, &credentials.password)
        .await?;

    let claims = SessionClaims::new(
        &credentials.email,
        ConnectionType::Basic,
        state.session_ttl_secs,
    );
    let token = state
        .codec
        .issue(&claims)
        .map_err(|_| AuthApiError::TokenIssuance)?;

    info!(email = %credentials.email, "basic login succeeded");
    let jar = jar.add(grant_session_cookie(token, state.session_ttl_secs));
    Ok((jar, Json(SuccessResponse::new("Connection successful"))))
}
