use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

use crate::domain::{
    ApiResponse, ClientError, ContentKind, FieldErrors, FilePart, RequestEnvelope,
};
use crate::interface_adapters::middleware::Pipeline;

// 422 payload: `errors` maps fields to one message or a list of them.
#[derive(Debug, Deserialize)]
struct ValidationPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Map<String, Value>,
}

// Thin wrapper around reqwest bound to one origin, with a fixed middleware pipeline.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    content_kind: ContentKind,
    pipeline: Pipeline,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        content_kind: ContentKind,
        pipeline: Pipeline,
    ) -> Result<Self, ClientError> {
        Url::parse(base_url)
            .map_err(|err| ClientError::InvalidRequest(format!("base url {base_url}: {err}")))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::InvalidRequest(format!("http client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            content_kind,
            pipeline,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn content_kind(&self) -> ContentKind {
        self.content_kind
    }

    pub async fn get(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.send(envelope(Method::GET, path, body, query)).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.send(envelope(Method::POST, path, body, query)).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.send(envelope(Method::PUT, path, body, query)).await
    }

    pub async fn patch(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.send(envelope(Method::PATCH, path, body, query)).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.send(envelope(Method::DELETE, path, body, query)).await
    }

    // Runs the request middleware, transmits, then runs the response middleware.
    #[tracing::instrument(
        name = "api_request",
        skip_all,
        fields(method = %request.method, path = %request.path)
    )]
    pub async fn send(&self, mut request: RequestEnvelope) -> Result<ApiResponse, ClientError> {
        let outcome = match self.pipeline.apply_request(&mut request).await {
            Ok(()) => self.transmit(request).await,
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(response) => tracing::debug!(status = %response.status, "request completed."),
            Err(err) => tracing::debug!(error = %err, "request failed."),
        }
        self.pipeline.apply_response(outcome).await
    }

    async fn transmit(&self, request: RequestEnvelope) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(&request.path, &request.query)?;
        let mut builder = self
            .http
            .request(request.method, url)
            .headers(request.headers);

        let multipart = !request.files.is_empty()
            || (self.content_kind == ContentKind::Multipart && request.body.is_some());
        if multipart {
            builder = builder.multipart(build_form(request.body, request.files)?);
        } else if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let res = builder.send().await.map_err(ClientError::Network)?;
        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))?;
        let response = ApiResponse::from_bytes(status, &bytes);

        if status.is_success() {
            return Ok(response);
        }
        // Keep upstream status/body so callers can show their own message.
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(validation_error(response.body));
        }
        Err(ClientError::Http {
            status,
            body: response.body,
        })
    }

    fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&joined)
            .map_err(|err| ClientError::InvalidRequest(format!("url {joined}: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

fn envelope(
    method: Method,
    path: &str,
    body: Option<Value>,
    query: &[(&str, &str)],
) -> RequestEnvelope {
    let request = RequestEnvelope::new(method, path).with_query(query.iter().copied());
    match body {
        Some(body) => request.with_body(body),
        None => request,
    }
}

fn validation_error(body: Value) -> ClientError {
    let payload = ValidationPayload::deserialize(&body).unwrap_or(ValidationPayload {
        message: None,
        errors: Map::new(),
    });

    let mut errors = FieldErrors::new();
    for (field, messages) in payload.errors {
        let messages = match messages {
            Value::Array(items) => items.iter().map(text_value).collect(),
            other => vec![text_value(&other)],
        };
        errors.insert(field, messages);
    }

    ClientError::Validation {
        message: payload
            .message
            .unwrap_or_else(|| "validation failed".to_string()),
        errors,
    }
}

// Top-level body fields become text parts; nested values are sent as JSON text.
fn build_form(body: Option<Value>, files: Vec<FilePart>) -> Result<Form, ClientError> {
    let mut form = Form::new();

    match body {
        None => {}
        Some(Value::Object(fields)) => {
            for (name, value) in fields {
                form = form.text(name, text_value(&value));
            }
        }
        Some(_) => {
            return Err(ClientError::InvalidRequest(
                "multipart body must be a JSON object".to_string(),
            ));
        }
    }

    for file in files {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime) = file.mime.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|err| ClientError::InvalidRequest(format!("file mime: {err}")))?;
        }
        form = form.part(file.field, part);
    }
    Ok(form)
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
