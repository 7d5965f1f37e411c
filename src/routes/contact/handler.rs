use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};

use super::model::{Contact, CreateContactRequest};
use crate::AppState;
use crate::database::EntityStore;
use crate::error::ApiError;
use crate::result::ApiResponse;

#[axum::debug_handler]
pub async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Contact>>), ApiError> {
    let Json(req) = body.map_err(|_| ApiError::invalid_body())?;

    let contact = state.store::<Contact>().insert(req).await.map_err(|e| {
        tracing::error!("Failed to create contact: {}", e);
        ApiError::Internal("Error saving data")
    })?;

    state.notifier.notify_contact(&contact);

    Ok((StatusCode::CREATED, Json(ApiResponse::created(contact))))
}
