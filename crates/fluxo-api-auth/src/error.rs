//! Authentication API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the authentication routes and the session gate chain.
///
/// Every variant renders as `{"error": <message>}` with the status code the
/// clients of the original API expect. Exactly one reason per failed
/// request; validation failures are never aggregated.
#[derive(Debug, Error)]
pub enum AuthApiError {
    // Gate chain stages, in order.
    #[error("No authentication token")]
    NoToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Email not found in token")]
    EmailMissing,

    #[error("Connection type not found in token")]
    ConnectionTypeMissing,

    // Request validation.
    #[error("Invalid request body")]
    InvalidBody,

    // Credential checks.
    #[error("Could not find requested user")]
    UserNotFound,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Email address already used")]
    EmailTaken,

    #[error("Could not find user")]
    UserLookup,

    // Account management. `AccountMissing` carries the same message as
    // `UserNotFound` but renders as 400: the caller is authenticated, the
    // account behind the session is what is gone.
    #[error("Could not find requested user")]
    AccountMissing,

    #[error("Old password is incorrect")]
    OldPasswordIncorrect,

    #[error("Could not modify the password")]
    PasswordChangeFailed,

    #[error("Could not delete account")]
    AccountDeletionFailed,

    #[error("Error creating token")]
    TokenIssuance,

    #[error("Internal server error")]
    Store(#[source] StoreError),
}

/// Uniform error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AuthApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthApiError::NoToken
            | AuthApiError::InvalidToken
            | AuthApiError::EmailMissing
            | AuthApiError::ConnectionTypeMissing
            | AuthApiError::UserNotFound
            | AuthApiError::WrongPassword => StatusCode::UNAUTHORIZED,
            AuthApiError::InvalidBody | AuthApiError::AccountMissing => StatusCode::BAD_REQUEST,
            AuthApiError::OldPasswordIncorrect => StatusCode::FORBIDDEN,
            AuthApiError::EmailTaken => StatusCode::CONFLICT,
            AuthApiError::UserLookup
            | AuthApiError::TokenIssuance
            | AuthApiError::PasswordChangeFailed
            | AuthApiError::AccountDeletionFailed
            | AuthApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AuthApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound => AuthApiError::UserNotFound,
            StoreError::WrongPassword => AuthApiError::WrongPassword,
            StoreError::EmailTaken => AuthApiError::EmailTaken,
            StoreError::Internal(_) => AuthApiError::Store(err),
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        if let AuthApiError::Store(ref e) = self {
            // Collaborator internals are logged, never sent to the caller.
            tracing::error!(error = %e, "credential store failure");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_errors_are_unauthorized() {
        for err in [
            AuthApiError::NoToken,
            AuthApiError::InvalidToken,
            AuthApiError::EmailMissing,
            AuthApiError::ConnectionTypeMissing,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_store_error_mapping() {
        assert_eq!(
            AuthApiError::from(StoreError::EmailTaken).status_code(),
            StatusCode::CONFLICT
        );
        assert!(matches!(
            AuthApiError::from(StoreError::UserNotFound),
            AuthApiError::UserNotFound
        ));
        assert!(matches!(
            AuthApiError::from(StoreError::Internal("db down".to_string())),
            AuthApiError::Store(_)
        ));
    }

    #[test]
    fn test_wire_messages_match_contract() {
        assert_eq!(AuthApiError::NoToken.to_string(), "No authentication token");
        assert_eq!(AuthApiError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            AuthApiError::InvalidBody.to_string(),
            "Invalid request body"
        );
        assert_eq!(
            AuthApiError::OldPasswordIncorrect.to_string(),
            "Old password is incorrect"
        );
        assert_eq!(
            AuthApiError::PasswordChangeFailed.to_string(),
            "Could not modify the password"
        );
        assert_eq!(
            AuthApiError::AccountDeletionFailed.to_string(),
            "Could not delete account"
        );
    }

    #[test]
    fn test_account_management_statuses() {
        assert_eq!(
            AuthApiError::AccountMissing.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthApiError::OldPasswordIncorrect.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthApiError::PasswordChangeFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthApiError::AccountDeletionFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
