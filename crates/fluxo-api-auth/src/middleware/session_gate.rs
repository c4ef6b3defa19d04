//! The session gate chain.
//!
//! An ordered pipeline of independent checks applied to every protected
//! route. Each stage either short-circuits with a 401 and a single reason,
//! or passes control on:
//!
//! 1. `verify_session_cookie` — the `JWToken` cookie must exist and decode
//!    into valid claims; the typed claims are attached to the request
//!    extensions.
//! 2. `require_email_claim` — the decoded claims must carry a non-empty
//!    subject email.
//! 3. `require_connection_type_claim` — the decoded claims must carry the
//!    connection type.
//!
//! Stage N runs only if stages 1..N-1 passed, and no stage mutates the
//! claims a previous stage attached. Routes needing a subset can apply the
//! stages individually; [`session_gate`] declares the full chain in order.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use fluxo_auth::{SessionClaims, TokenCodec, SESSION_COOKIE};

use crate::error::AuthApiError;

/// Stage 1–2: cookie presence and token validity.
///
/// On success the decoded [`SessionClaims`] are inserted into the request
/// extensions for the later stages and the handler.
pub async fn verify_session_cookie(
    State(codec): State<Arc<TokenCodec>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    let jar = CookieJar::from_headers(request.headers());
    let cookie = jar.get(SESSION_COOKIE).ok_or(AuthApiError::NoToken)?;

    let claims = codec.verify(cookie.value()).map_err(|e| {
        tracing::debug!(error = %e, "session token rejected");
        AuthApiError::InvalidToken
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Stage 3: the claims attached by the previous stage must carry a
/// non-empty subject email.
pub async fn require_email_claim(request: Request, next: Next) -> Result<Response, AuthApiError> {
    match request.extensions().get::<SessionClaims>() {
        Some(claims) if !claims.email.is_empty() => Ok(next.run(request).await),
        _ => Err(AuthApiError::EmailMissing),
    }
}

/// Stage 4: the claims attached by stage 1–2 must be present so the
/// connection type can be read by name downstream.
pub async fn require_connection_type_claim(
    request: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    if request.extensions().get::<SessionClaims>().is_some() {
        Ok(next.run(request).await)
    } else {
        Err(AuthApiError::ConnectionTypeMissing)
    }
}

/// Apply the full gate chain to a router.
///
/// Layers added last run first, so the declared run order is:
/// token presence/validity, then email claim, then connection type claim.
pub fn session_gate<S>(router: Router<S>, codec: Arc<TokenCodec>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(middleware::from_fn(require_connection_type_claim))
        .layer(middleware::from_fn(require_email_claim))
        .layer(middleware::from_fn_with_state(codec, verify_session_cookie))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use fluxo_auth::ConnectionType;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"gate-chain-test-secret";

    async fn claims_echo(axum::Extension(claims): axum::Extension<SessionClaims>) -> String {
        format!("{}:{}", claims.email, claims.connection_type)
    }

    fn gated_app() -> Router {
        let codec = Arc::new(TokenCodec::new(SECRET));
        session_gate(Router::new().route("/whoami", get(claims_echo)), codec)
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_cookie_rejected_first() {
        let response = gated_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"No authentication token"}"#
        );
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let response = gated_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(header::COOKIE, "JWToken=not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, r#"{"error":"Invalid token"}"#);
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let other = TokenCodec::new(b"a-different-secret");
        let token = other
            .issue(&SessionClaims::new("a@b.c", ConnectionType::Basic, 3600))
            .unwrap();

        let response = gated_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(header::COOKIE, format!("JWToken={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, r#"{"error":"Invalid token"}"#);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_claims() {
        let codec = TokenCodec::new(SECRET);
        let token = codec
            .issue(&SessionClaims::new(
                "user@example.com",
                ConnectionType::Github,
                3600,
            ))
            .unwrap();

        let response = gated_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(header::COOKIE, format!("JWToken={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "user@example.com:github");
    }

    #[tokio::test]
    async fn test_empty_email_claim_rejected_by_stage_three() {
        let codec = TokenCodec::new(SECRET);
        let token = codec
            .issue(&SessionClaims::new("", ConnectionType::Basic, 3600))
            .unwrap();

        let response = gated_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(header::COOKIE, format!("JWToken={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Email not found in token"}"#
        );
    }

    #[tokio::test]
    async fn test_email_stage_alone_requires_prior_decode() {
        // Stage 3 applied without stages 1-2: no claims in extensions.
        let app = Router::new()
            .route("/x", get(|| async { "ok" }))
            .layer(middleware::from_fn(require_email_claim));

        let response = app
            .oneshot(HttpRequest::builder().uri("/x").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Email not found in token"}"#
        );
    }
}
