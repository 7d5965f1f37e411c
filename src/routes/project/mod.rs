mod handler;
mod model;

pub use handler::create_project;
pub use model::{CreateProjectRequest, MAX_PROJECT_DESCRIPTION, Project};
