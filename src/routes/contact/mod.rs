mod handler;
mod model;

pub use handler::create_contact;
pub use model::{Contact, CreateContactRequest};
