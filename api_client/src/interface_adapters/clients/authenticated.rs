use serde_json::Value;
use std::sync::Arc;

use crate::domain::{ApiResponse, ClientError, ContentKind, RequestEnvelope, UnauthorizedHandler};
use crate::frameworks::config::ClientConfig;
use crate::interface_adapters::clients::http::ApiClient;
use crate::interface_adapters::middleware::{BearerToken, Pipeline, UnauthorizedRedirect};
use crate::use_cases::Session;

// Staff/admin client: bearer token on every request, sign-out on 401.
#[derive(Clone)]
pub struct AuthenticatedClient {
    inner: ApiClient,
}

impl AuthenticatedClient {
    pub fn new(
        config: &ClientConfig,
        session: Session,
        on_unauthorized: Arc<dyn UnauthorizedHandler>,
    ) -> Result<Self, ClientError> {
        Self::with_content_kind(config, session, on_unauthorized, ContentKind::Json)
    }

    // Same middleware; bodies default to multipart/form-data.
    pub fn multipart(
        config: &ClientConfig,
        session: Session,
        on_unauthorized: Arc<dyn UnauthorizedHandler>,
    ) -> Result<Self, ClientError> {
        Self::with_content_kind(config, session, on_unauthorized, ContentKind::Multipart)
    }

    fn with_content_kind(
        config: &ClientConfig,
        session: Session,
        on_unauthorized: Arc<dyn UnauthorizedHandler>,
        content_kind: ContentKind,
    ) -> Result<Self, ClientError> {
        let pipeline = Pipeline::new()
            .request(BearerToken::new(session.clone()))
            .response(UnauthorizedRedirect::new(
                session,
                on_unauthorized,
                config.sign_in_route.clone(),
            ));
        let inner = ApiClient::new(
            &config.api_base_url,
            config.request_timeout(),
            content_kind,
            pipeline,
        )?;
        Ok(Self { inner })
    }

    pub fn content_kind(&self) -> ContentKind {
        self.inner.content_kind()
    }

    pub async fn get(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.inner.get(path, body, query).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.inner.post(path, body, query).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.inner.put(path, body, query).await
    }

    pub async fn patch(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.inner.patch(path, body, query).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        self.inner.delete(path, body, query).await
    }

    pub async fn send(&self, request: RequestEnvelope) -> Result<ApiResponse, ClientError> {
        self.inner.send(request).await
    }
}
