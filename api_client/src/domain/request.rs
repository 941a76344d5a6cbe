use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::errors::ClientError;

// How a client encodes request bodies when the caller does not force multipart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentKind {
    #[default]
    Json,
    Multipart,
}

impl ContentKind {
    pub fn mime(self) -> &'static str {
        match self {
            ContentKind::Json => "application/json",
            ContentKind::Multipart => "multipart/form-data",
        }
    }
}

// File attached to a multipart request.
#[derive(Clone, Debug)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

// Outgoing request before transmission; request middleware mutate it in place.
#[derive(Clone, Debug)]
pub struct RequestEnvelope {
    pub method: Method,
    // Relative to the client's base origin.
    pub path: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub files: Vec<FilePart>,
}

impl RequestEnvelope {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            files: Vec::new(),
        }
    }

    pub fn with_query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_file(mut self, file: FilePart) -> Self {
        self.files.push(file);
        self
    }

    // Verbs whose body the guest middleware also scopes.
    pub fn is_mutating(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT || self.method == Method::PATCH
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

// Decoded server reply. Empty bodies become `Null`; non-JSON text becomes a string.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn from_bytes(status: StatusCode, bytes: &[u8]) -> Self {
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
        };
        Self { status, body }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        T::deserialize(&self.body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}
