//! Account registration handler.

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use tracing::info;

use crate::error::AuthApiError;
use crate::models::{SuccessResponse, UserCredentials};
use crate::router::AuthState;

/// `POST /register` — create a basic (password) account.
pub async fn register(
    State(state): State<AuthState>,
    body: Result<Json<UserCredentials>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AuthApiError> {
    let Json(credentials) = body.map_err(|_| AuthApiError::InvalidBody)?;

    state
        .store
        .register_basic(&credentials.email, &credentials.password)
        .await?;

    info!(email = %credentials.email, "basic account created");
    Ok(Json(SuccessResponse::new("New user created")))
}
