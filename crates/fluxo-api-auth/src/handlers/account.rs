//! Account management handlers: password change and account deletion.

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use fluxo_auth::ConnectionType;
use tracing::info;

use crate::error::AuthApiError;
use crate::extractors::Session;
use crate::models::{PasswordChange, SuccessResponse};
use crate::router::AuthState;
use crate::store::StoreError;

/// `PUT /user/modify-password` — change the password of a basic account.
///
/// Only password-established sessions can change a password; a federated
/// account has none to change.
pub async fn modify_password(
    State(state): State<AuthState>,
    Session(claims): Session,
    body: Result<Json<PasswordChange>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AuthApiError> {
    let Json(change) = body.map_err(|_| AuthApiError::InvalidBody)?;

    if claims.connection_type != ConnectionType::Basic {
        return Err(AuthApiError::PasswordChangeFailed);
    }

    state
        .store
        .update_password(&claims.email, &change.old_password, &change.password)
        .await
        .map_err(|e| match e {
            StoreError::UserNotFound => AuthApiError::AccountMissing,
            StoreError::WrongPassword => AuthApiError::OldPasswordIncorrect,
            _ => AuthApiError::PasswordChangeFailed,
        })?;

    info!(email = %claims.email, "password changed");
    Ok(Json(SuccessResponse::new("Password modified")))
}

/// `DELETE /user` — delete the account behind the current session.
///
/// The cookie is left alone: the remaining credential names an account
/// that no longer exists, so every later lookup through it fails.
pub async fn delete_account(
    State(state): State<AuthState>,
    Session(claims): Session,
) -> Result<Json<SuccessResponse>, AuthApiError> {
    state
        .store
        .delete_account(&claims.email, claims.connection_type)
        .await
        .map_err(|_| AuthApiError::AccountDeletionFailed)?;

    info!(email = %claims.email, connection_type = %claims.connection_type, "account deleted");
    Ok(Json(SuccessResponse::new("Account deleted")))
}
