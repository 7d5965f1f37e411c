mod handler;
mod model;

pub use handler::create_about;
pub use model::{About, CreateAboutRequest};
