//! Basic authentication API and the session gate chain.
//!
//! This crate gates every protected route: an explicit, ordered chain of
//! claim checks (token presence, token validity, email claim, connection
//! type claim) that short-circuits with a 401 and a single reason. It also
//! carries the password-login and account-management surface (`/register`,
//! `/login`, `/logout`, `/user`, `/user/modify-password`); password hashing
//! and account persistence live behind the [`CredentialStore`] collaborator
//! trait.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod store;

pub use error::AuthApiError;
pub use extractors::Session;
pub use middleware::session_gate;
pub use router::{auth_router, protected_auth_router, public_auth_router, AuthState};
pub use store::{AccountInfo, CredentialStore, StoreError};
