use serde_json::Value;
use std::sync::Arc;

use crate::domain::{ApiResponse, ClientError, ContentKind, RequestEnvelope, UnauthorizedHandler};
use crate::frameworks::config::ClientConfig;
use crate::interface_adapters::clients::http::ApiClient;
use crate::interface_adapters::middleware::{
    BearerToken, GuestIdentity, Pipeline, UnauthorizedRedirect,
};
use crate::use_cases::Session;

// Guest ordering client: bearer token plus guest identifiers on every request.
#[derive(Clone)]
pub struct GuestAuthenticatedClient {
    inner: ApiClient,
}

impl GuestAuthenticatedClient {
    pub fn new(
        config: &ClientConfig,
        session: Session,
        on_unauthorized: Arc<dyn UnauthorizedHandler>,
    ) -> Result<Self, ClientError> {
        let pipeline = Pipeline::new()
            .request(BearerToken::new(session.clone()))
            .request(GuestIdentity::new(session.clone()))
            .response(UnauthorizedRedirect::new(
                session,
                on_unauthorized,
                config.guest_sign_in_route.clone(),
            ));
        let inner = ApiClient::new(
            &config.api_base_url,
            config.request_timeout(),
            ContentKind::Json,
            pipeline,
        )?;
        Ok(Self { inner })
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
