//! Request and response bodies for the authentication routes.

use serde::{Deserialize, Serialize};

use crate::store::AccountInfo;

/// Credentials for `/register` and `/login`.
#[derive(Debug, Deserialize)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

/// Body of `PUT /user/modify-password`.
#[derive(Debug, Deserialize)]
pub struct PasswordChange {
    #[serde(rename = "oldpassword")]
    pub old_password: String,
    pub password: String,
}

/// Uniform success body.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: &'static str,
}

impl SuccessResponse {
    #[must_use]
    pub fn new(success: &'static str) -> Self {
        Self { success }
    }
}

/// Body of `GET /user`.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: AccountInfo,
}
