//! HTTP handlers for the federation routes.

mod callback;
mod status;

pub use callback::{login_callback, service_callback};
pub use status::authentication_status;
