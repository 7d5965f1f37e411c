use std::time::Instant;

use axum::{
    body::{Body, Bytes, HttpBody, to_bytes},
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{Level, debug, info};

use super::auth::API_KEY_HEADER;
use super::error_handler::MAX_LOGGED_BODY;

pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let log_bodies = tracing::enabled!(Level::DEBUG);

    let req = if log_bodies {
        let (parts, body) = req.into_parts();
        let (body, logged) = buffer_for_log(body).await;
        debug!(
            method = %method,
            uri = %uri,
            headers = ?redacted_headers(&parts.headers),
            body = %display_body(logged.as_ref()),
            "Request received"
        );
        Request::from_parts(parts, body)
    } else {
        req
    };

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let response = if log_bodies {
        let (parts, body) = response.into_parts();
        let (body, logged) = buffer_for_log(body).await;
        debug!(
            method = %method,
            uri = %uri,
            body = %display_body(logged.as_ref()),
            "Response body"
        );
        Response::from_parts(parts, body)
    } else {
        response
    };

    info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        elapsed_ms,
        "Request processed"
    );
    response
}

/// 长度已知且不超过上限时读出 body 用于日志，并重新包装成新的 body
async fn buffer_for_log(body: Body) -> (Body, Option<Bytes>) {
    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_LOGGED_BODY as u64);
    if !fits {
        return (body, None);
    }

    match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => (Body::from(bytes.clone()), Some(bytes)),
        Err(e) => {
            debug!(error = %e, "Failed to read body for logging");
            (Body::empty(), None)
        }
    }
}

fn display_body(bytes: Option<&Bytes>) -> String {
    match bytes {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => "<not captured>".to_string(),
    }
}

fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if name.as_str() == API_KEY_HEADER {
                "<redacted>".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.to_string(), value)
        })
        .collect()
}
