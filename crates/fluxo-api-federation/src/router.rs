//! Router configuration for the federation routes.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::FederationService;

/// Shared state for the federation handlers.
#[derive(Clone)]
pub struct FederationState {
    pub service: Arc<FederationService>,
}

/// Routes that require no session: the login callback mints one.
pub fn public_federation_router() -> Router<FederationState> {
    Router::new().route("/login-callback", post(handlers::login_callback))
}

/// Routes operating on an existing session. The caller must place these
/// behind the session gate chain; the handlers reject with 401 otherwise.
pub fn protected_federation_router() -> Router<FederationState> {
    Router::new()
        .route("/service-callback", post(handlers::service_callback))
        .route(
            "/service-authentication-status",
            get(handlers::authentication_status),
        )
}
