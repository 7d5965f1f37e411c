use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;
use crate::middleware::{log_errors, log_requests, require_api_key};
use crate::routes::{self, about::About, contact::Contact, project::Project};

// 简介相关的路由
pub fn about_routes() -> Router<AppState> {
    Router::new()
        .route("/createAbout", post(routes::about::create_about))
        .route("/about", get(routes::get_entity::<About>))
}

// 留言相关的路由
pub fn contact_routes() -> Router<AppState> {
    Router::new().route(
        "/contactme",
        post(routes::contact::create_contact).get(routes::get_entity::<Contact>),
    )
}

// 项目相关的路由
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/addProject", post(routes::project::create_project))
        .route("/project", get(routes::get_entity::<Project>))
}

// 创建主路由，所有接口都需要 API key
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(about_routes())
        .merge(contact_routes())
        .merge(project_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .layer(axum::middleware::from_fn(log_errors))
        .layer(axum::middleware::from_fn(log_requests))
        .with_state(state)
}
