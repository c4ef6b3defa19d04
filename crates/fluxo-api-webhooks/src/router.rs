//! Router configuration for the webhook routes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;

use crate::error::WebhookError;
use crate::gate::AdmissionGate;

/// Shared state for the webhook handler.
#[derive(Clone)]
pub struct WebhooksState {
    pub gate: Arc<AdmissionGate>,
}

#[derive(Serialize)]
struct SuccessResponse {
    success: &'static str,
}

/// `POST /webhooks/:service` — run one delivery through the gate.
async fn receive_webhook(
    State(state): State<WebhooksState>,
    Path(service): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SuccessResponse>, WebhookError> {
    state.gate.admit(&service, headers, body).await?;
    Ok(Json(SuccessResponse {
        success: "Webhook received",
    }))
}

/// The webhook ingestion router. Deliberately outside the session gate:
/// senders are third-party services, not logged-in users.
pub fn webhooks_router(state: WebhooksState) -> Router {
    Router::new()
        .route("/webhooks/:service", post(receive_webhook))
        .with_state(state)
}
