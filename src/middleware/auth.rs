use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// 校验请求头中的 API key
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|header| header.to_str().ok())
        .unwrap_or_default();

    if api_key.is_empty() {
        return Err(ApiError::Forbidden("apikey required"));
    }
    if api_key != state.config.api_key {
        tracing::warn!(uri = %req.uri(), "Rejected request with invalid api key");
        return Err(ApiError::Forbidden("Invalid apikey"));
    }

    Ok(next.run(req).await)
}
