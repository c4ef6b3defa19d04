//! Handlers for the authenticated session: identity lookup and logout.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use fluxo_auth::revoke_session_cookie;
use tracing::info;

use crate::error::AuthApiError;
use crate::extractors::Session;
use crate::models::{SuccessResponse, UserResponse};
use crate::router::AuthState;

/// `GET /user` — return the account behind the current session.
pub async fn get_user(
    State(state): State<AuthState>,
    Session(claims): Session,
) -> Result<Json<UserResponse>, AuthApiError> {
    let user = state
        .store
        .find_account(&claims.email, claims.connection_type)
        .await
        .map_err(|_| AuthApiError::UserLookup)?;

    Ok(Json(UserResponse { user }))
}

/// `POST /logout` — clear the session cookie.
///
/// Revocation is client-side only: the cookie is replaced with an already
/// expired empty one, and the old token simply ages out.
pub async fn logout(
    Session(claims): Session,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    info!(email = %claims.email, "session revoked");
    let jar = jar.add(revoke_session_cookie());
    (jar, Json(SuccessResponse::new("Logout successful")))
}
