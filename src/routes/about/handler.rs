use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};

use super::model::{About, CreateAboutRequest};
use crate::AppState;
use crate::database::EntityStore;
use crate::error::ApiError;
use crate::result::ApiResponse;

#[axum::debug_handler]
pub async fn create_about(
    State(state): State<AppState>,
    body: Result<Json<CreateAboutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<About>>), ApiError> {
    let Json(req) = body.map_err(|_| ApiError::invalid_body())?;
    if req.content.trim().is_empty() {
        return Err(ApiError::invalid_body());
    }

    let about = state.store::<About>().insert(req).await.map_err(|e| {
        tracing::error!("Failed to create about: {}", e);
        ApiError::Internal("Error saving data")
    })?;

    Ok((StatusCode::CREATED, Json(ApiResponse::created(about))))
}
