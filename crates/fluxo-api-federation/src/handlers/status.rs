//! Link status handler.

use axum::extract::{Query, State};
use axum::Json;

use crate::error::FederationError;
use crate::extractors::Session;
use crate::models::{AuthStatusResponse, StatusQuery};
use crate::router::FederationState;

/// `GET /service-authentication-status?service=…` — whether the session's
/// account already has the named provider linked.
pub async fn authentication_status(
    State(state): State<FederationState>,
    Query(query): Query<StatusQuery>,
    Session(claims): Session,
) -> Result<Json<AuthStatusResponse>, FederationError> {
    let service = query.service.unwrap_or_default();

    let authenticated = state
        .service
        .authentication_status(&claims, &service)
        .await?;

    Ok(Json(AuthStatusResponse { authenticated }))
}
