mod auth;
mod error_handler;
mod request_log;

pub use auth::{API_KEY_HEADER, require_api_key};
pub use error_handler::log_errors;
pub use request_log::log_requests;
