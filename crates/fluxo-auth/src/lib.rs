//! Session credential handling for fluxo.
//!
//! This crate owns the signed session credential carried in the `JWToken`
//! cookie: the strongly-typed claims, the HS256 codec that issues and
//! verifies tokens, and the cookie grant/revoke helpers. The signing secret
//! is injected at construction — nothing here reads process environment.

pub mod claims;
pub mod cookie;
pub mod error;
pub mod jwt;

pub use claims::{ConnectionType, SessionClaims};
pub use cookie::{grant_session_cookie, revoke_session_cookie, SESSION_COOKIE};
pub use error::AuthError;
pub use jwt::TokenCodec;
