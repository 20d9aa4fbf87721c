use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::response::error_response;

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Gives framework-generated failures (unmatched route, rejected method,
/// oversized body) the same `{ "error": ... }` body as handler errors.
/// Status and headers other than the body framing are kept.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || has_json_body(response.headers())
    {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_owned())
        .unwrap_or_default();
    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_owned()
    } else {
        text
    };
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %message, "request failed");
    }

    let mut headers = parts.headers;
    headers.remove(header::CONTENT_TYPE);
    headers.remove(header::CONTENT_LENGTH);
    let mut rewritten = error_response(status, message);
    rewritten.headers_mut().extend(headers);
    rewritten
}

fn has_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
