//! # Response Mapping Middleware
//!
//! Logs server-error responses with the request they belong to. Error
//! bodies are already uniform (`AppError` renders `{"error", "code"}`), so
//! responses pass through unchanged.

use crate::middleware::RequestStamp;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::error;

/// Response mapping middleware.
pub async fn map_res(req: Request, next: Next) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let path = req.uri().path().to_string();

    let res = next.run(req).await;

    if res.status().is_server_error() {
        error!(
            request_id = %request_id,
            path = %path,
            "[RESPONSE] Server error: {}",
            res.status()
        );
    }

    res
}
