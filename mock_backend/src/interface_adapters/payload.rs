use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

use crate::interface_adapters::protocol::ErrorResponse;

// Request body accepted as JSON or multipart form data, normalized to an object.
// File fields are kept as `{ "file_name": ..., "size": ... }`.
pub struct Payload(pub Map<String, Value>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return read_multipart(multipart).await.map(Payload);
        }

        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        if bytes.is_empty() {
            return Ok(Payload(Map::new()));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(fields)) => Ok(Payload(fields)),
            Ok(Value::Null) => Ok(Payload(Map::new())),
            Ok(_) => Err(bad_request("expected a JSON object body")),
            Err(_) => Err(bad_request("malformed JSON body")),
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<Map<String, Value>, Response> {
    let mut fields = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
            fields.insert(
                name,
                serde_json::json!({ "file_name": file_name, "size": bytes.len() }),
            );
        } else {
            let text = field.text().await.map_err(IntoResponse::into_response)?;
            fields.insert(name, Value::String(text));
        }
    }
    Ok(fields)
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}
