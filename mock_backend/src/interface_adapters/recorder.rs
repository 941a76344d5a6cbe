use axum::body::{Body, to_bytes};
use axum::extract::{Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::interface_adapters::state::{AppState, RecordedRequest};

// Upper bound on buffered request bodies.
const MAX_RECORDED_BODY: usize = 2 * 1024 * 1024;

// Middleware that records every request before handing it to the router.
pub async fn record_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_RECORDED_BODY).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "failed to buffer request body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header_value(header::CONTENT_TYPE);
    let body = content_type
        .as_deref()
        .filter(|value| value.starts_with("application/json"))
        .and_then(|_| serde_json::from_slice(&bytes).ok());
    let query = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query,
        authorization: header_value(header::AUTHORIZATION),
        content_type,
        body,
    };
    tracing::debug!(method = %recorded.method, path = %recorded.path, "request recorded");
    state.requests.record(recorded).await;

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
