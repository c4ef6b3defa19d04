//! Request middleware for protected routes.

pub mod session_gate;

pub use session_gate::{
    require_connection_type_claim, require_email_claim, session_gate, verify_session_cookie,
};
