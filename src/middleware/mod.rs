mod auth;
mod error_handler;
mod session;

pub use auth::require_login;
pub use error_handler::log_errors;
pub use session::{SESSION_COOKIE, session_cookie};
