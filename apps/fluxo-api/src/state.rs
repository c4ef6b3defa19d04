//! Application wiring: stores, providers, routers.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use fluxo_api_auth::{auth_router, session_gate, AuthState};
use fluxo_api_federation::providers::{
    DiscordProvider, GithubProvider, GitlabProvider, GoogleProvider, ProviderClient,
    SpotifyProvider,
};
use fluxo_api_federation::{
    protected_federation_router, public_federation_router, FederationService, FederationState,
    ProviderKind, ProviderRegistry,
};
use fluxo_api_webhooks::{webhooks_router, AdmissionGate, WebhooksState};
use fluxo_auth::TokenCodec;
use tower_http::cors::CorsLayer;

use crate::config::{Config, ConfigError};
use crate::store::InMemoryStore;
use crate::triggers::LoggingTriggerEvaluator;

fn build_registry(config: &Config) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    for (kind, credentials) in &config.providers {
        let provider: Arc<dyn ProviderClient> = match kind {
            ProviderKind::Github => Arc::new(GithubProvider::new(credentials.clone())),
            ProviderKind::Gitlab => Arc::new(GitlabProvider::new(credentials.clone())),
            ProviderKind::Google => Arc::new(GoogleProvider::new(credentials.clone())),
            ProviderKind::Discord => Arc::new(DiscordProvider::new(credentials.clone())),
            ProviderKind::Spotify => Arc::new(SpotifyProvider::new(credentials.clone())),
        };
        tracing::info!(provider = %kind, "identity provider configured");
        registry.register(provider);
    }
    registry
}

fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    // Credentialed cross-site cookies rule out wildcard origins.
    let origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::Invalid {
            name: "FRONTEND_ORIGIN",
            value: config.frontend_origin.clone(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Assemble the full application router from configuration.
pub fn build_router(config: &Config) -> Result<Router, ConfigError> {
    let codec = Arc::new(TokenCodec::new(config.session_secret.as_bytes()));
    let store = Arc::new(InMemoryStore::new());

    let auth = auth_router(AuthState {
        codec: codec.clone(),
        store: store.clone(),
        session_ttl_secs: config.session_ttl_secs,
    });

    let federation_state = FederationState {
        service: Arc::new(FederationService::new(
            Arc::new(build_registry(config)),
            store,
            codec.clone(),
            config.session_ttl_secs,
        )),
    };
    let federation_public =
        public_federation_router().with_state(federation_state.clone());
    let federation_protected = session_gate(
        protected_federation_router().with_state(federation_state),
        codec,
    );

    let webhooks = webhooks_router(WebhooksState {
        gate: Arc::new(AdmissionGate::new(Arc::new(LoggingTriggerEvaluator))),
    });

    Ok(Router::new()
        .merge(auth)
        .merge(federation_public)
        .merge(federation_protected)
        .merge(webhooks)
        .layer(cors_layer(config)?))
}
