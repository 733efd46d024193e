mod handler;
mod model;

pub use handler::{get_me, login, send_captcha};
pub use model::{PLACEHOLDER_PASSWORD, User};
