//! Handlers for the authentication routes.

pub mod account;
pub mod login;
pub mod register;
pub mod session;

pub use account::{delete_account, modify_password};
pub use login::login;
pub use register::register;
pub use session::{get_user, logout};
