//! Router configuration for the authentication routes.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use fluxo_auth::TokenCodec;

use crate::handlers;
use crate::middleware::session_gate;
use crate::store::CredentialStore;

/// Shared state for the authentication handlers.
#[derive(Clone)]
pub struct AuthState {
    /// Session credential codec (injected secret).
    pub codec: Arc<TokenCodec>,
    /// Account persistence and password verification collaborator.
    pub store: Arc<dyn CredentialStore>,
    /// Session and cookie lifetime in seconds.
    pub session_ttl_secs: i64,
}

/// Routes that require no session.
pub fn public_auth_router() -> Router<AuthState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Routes behind the full session gate chain.
pub fn protected_auth_router(codec: Arc<TokenCodec>) -> Router<AuthState> {
    let router = Router::new()
        .route("/logout", post(handlers::logout))
        .route(
            "/user",
            get(handlers::get_user).delete(handlers::delete_account),
        )
        .route("/user/modify-password", put(handlers::modify_password));
    session_gate(router, codec)
}

/// The complete authentication router.
pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .merge(public_auth_router())
        .merge(protected_auth_router(state.codec.clone()))
        .with_state(state)
}
