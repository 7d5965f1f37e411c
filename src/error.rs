use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::cache::{CacheError, NotFoundKind, ResolveError};

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(&'static str),
    NotFound(&'static str),
    Internal(&'static str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    response_code: u16,
    response_message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForbiddenResponse {
    response_code: u16,
    error: &'static str,
}

impl ApiError {
    pub fn invalid_body() -> Self {
        ApiError::BadRequest("Invalid request body format".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(NotFoundKind::Record) => ApiError::NotFound("Content not found"),
            ResolveError::NotFound(NotFoundKind::Empty) => ApiError::NotFound("No content found"),
            ResolveError::Config(e) => {
                tracing::error!(error = %e, "Invalid cache TTL configuration");
                ApiError::Internal("Invalid Redis TTL configuration")
            }
            ResolveError::Cache(CacheError::Decode(e)) => {
                tracing::error!(error = %e, "Failed to decode cached response");
                ApiError::Internal("Error processing cached data")
            }
            ResolveError::Cache(CacheError::Encode(e)) => {
                tracing::error!(error = %e, "Failed to encode response");
                ApiError::Internal("Internal Server Error")
            }
            ResolveError::Cache(e) => {
                tracing::error!(error = %e, "Error accessing cache");
                ApiError::Internal("Error accessing cache")
            }
            ResolveError::Store(e) => {
                tracing::error!(error = %e, "Error fetching from database");
                ApiError::Internal("Error retrieving data")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response_code = status.as_u16();

        let message = match self {
            // API key 校验失败时沿用 `error` 字段
            ApiError::Forbidden(error) => {
                return (
                    status,
                    Json(ForbiddenResponse {
                        response_code,
                        error,
                    }),
                )
                    .into_response();
            }
            ApiError::BadRequest(message) => message,
            ApiError::NotFound(message) | ApiError::Internal(message) => message.to_string(),
        };

        let body = Json(ErrorResponse {
            response_code,
            response_message: message,
        });

        (status, body).into_response()
    }
}
