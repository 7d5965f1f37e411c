use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};

use super::model::{CreateProjectRequest, MAX_PROJECT_DESCRIPTION, Project};
use crate::AppState;
use crate::database::EntityStore;
use crate::error::ApiError;
use crate::result::ApiResponse;

#[axum::debug_handler]
pub async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    let Json(req) = body.map_err(|_| ApiError::invalid_body())?;
    if req.description_too_long() {
        return Err(ApiError::BadRequest(format!(
            "Bad Request: projectDescription length should not exceed {} characters",
            MAX_PROJECT_DESCRIPTION
        )));
    }

    let project = state.store::<Project>().insert(req).await.map_err(|e| {
        tracing::error!("Failed to create project: {}", e);
        ApiError::Internal("Error saving data")
    })?;

    Ok((StatusCode::CREATED, Json(ApiResponse::created(project))))
}
