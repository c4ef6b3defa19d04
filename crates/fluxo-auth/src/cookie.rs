//! Session cookie lifecycle.
//!
//! The credential rides in a cookie consumed by a separate front-end
//! origin, so the attributes are fixed: `SameSite=None` (cross-site use),
//! which mandates `Secure`, plus `HttpOnly` to keep scripts out.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Name of the session credential cookie.
pub const SESSION_COOKIE: &str = "JWToken";

/// Build the cookie that grants a session for `ttl_secs`.
#[must_use]
pub fn grant_session_cookie(token: String, ttl_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::seconds(ttl_secs))
        .build()
}

/// Build the cookie that revokes the session: empty value, already expired.
///
/// Logout is client-side only; there is no server-side revocation list.
#[must_use]
pub fn revoke_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_attributes() {
        let cookie = grant_session_cookie("tok".to_string(), 3600);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn test_revoke_clears_value_and_expires() {
        let cookie = revoke_session_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert!(cookie.value().is_empty());
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }
}
