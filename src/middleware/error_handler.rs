use axum::{
    body::{Body, to_bytes},
    http::{Request, header::CONTENT_LENGTH},
    middleware::Next,
    response::Response,
};
use tracing::error;

/// 记录 5xx 响应体时读取的最大字节数
pub(super) const MAX_LOGGED_BODY: usize = 64 * 1024;

pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => {
            error!(
                method = %method,
                uri = %uri,
                status = %parts.status,
                body = %String::from_utf8_lossy(&bytes),
                "Server error occurred"
            );
            // 重置body以便重新构建响应
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            error!(method = %method, uri = %uri, error = %e, "Failed to read error response body");
            Response::from_parts(parts, Body::empty())
        }
    }
}
