//! Provider callback handlers.
//!
//! Two routes, two meanings. `/login-callback` is public and turns a
//! provider grant into a session; `/service-callback` sits behind the
//! session gate and links the provider to the session's account. The route
//! decides the flow; the payloads look identical on purpose.

use axum::extract::{rejection::JsonRejection, Query, State};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use fluxo_auth::grant_session_cookie;

use crate::error::FederationError;
use crate::extractors::Session;
use crate::models::{
    CallbackBody, CallbackKind, CallbackQuery, CallbackRequest, SuccessResponse,
};
use crate::router::FederationState;

/// `POST /login-callback?code=…` — federated login.
pub async fn login_callback(
    State(state): State<FederationState>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
    body: Result<Json<CallbackBody>, JsonRejection>,
) -> Result<(CookieJar, Json<SuccessResponse>), FederationError> {
    let Json(body) = body.map_err(|_| FederationError::InvalidBody)?;
    let request = CallbackRequest::from_parts(CallbackKind::Login, query.code, &body)?;

    let token = state.service.login(&request).await?;

    let jar = jar.add(grant_session_cookie(
        token,
        state.service.session_ttl_secs(),
    ));
    Ok((jar, Json(SuccessResponse::new("Connection successful"))))
}

/// `POST /service-callback?code=…` — link a provider to the current
/// session's account. Deliberately does not touch the session cookie.
pub async fn service_callback(
    State(state): State<FederationState>,
    Query(query): Query<CallbackQuery>,
    Session(claims): Session,
    body: Result<Json<CallbackBody>, JsonRejection>,
) -> Result<Json<SuccessResponse>, FederationError> {
    let Json(body) = body.map_err(|_| FederationError::InvalidBody)?;
    let request = CallbackRequest::from_parts(CallbackKind::Link, query.code, &body)?;

    state.service.link(&request, &claims).await?;

    Ok(Json(SuccessResponse::new("Token generated")))
}
