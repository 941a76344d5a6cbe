use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::{ApiResponse, ClientError, GuestContext, RequestEnvelope, UnauthorizedHandler};
use crate::use_cases::Session;

// Transform applied to every outgoing request, in pipeline order.
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    async fn on_request(&self, request: &mut RequestEnvelope) -> Result<(), ClientError>;
}

// Transform applied to every outcome, in pipeline order. Returning the outcome
// unchanged is the common case.
#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    async fn on_response(
        &self,
        outcome: Result<ApiResponse, ClientError>,
    ) -> Result<ApiResponse, ClientError>;
}

// Ordered middleware lists, fixed when a client is built.
#[derive(Clone, Default)]
pub struct Pipeline {
    request: Vec<Arc<dyn RequestMiddleware>>,
    response: Vec<Arc<dyn ResponseMiddleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        self.request.push(Arc::new(middleware));
        self
    }

    pub fn response(mut self, middleware: impl ResponseMiddleware + 'static) -> Self {
        self.response.push(Arc::new(middleware));
        self
    }

    pub async fn apply_request(&self, request: &mut RequestEnvelope) -> Result<(), ClientError> {
        for middleware in &self.request {
            middleware.on_request(request).await?;
        }
        Ok(())
    }

    pub async fn apply_response(
        &self,
        mut outcome: Result<ApiResponse, ClientError>,
    ) -> Result<ApiResponse, ClientError> {
        for middleware in &self.response {
            outcome = middleware.on_response(outcome).await;
        }
        outcome
    }
}

// Sets `Authorization: Bearer <token>` when the session holds a token.
pub struct BearerToken {
    session: Session,
}

impl BearerToken {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl RequestMiddleware for BearerToken {
    async fn on_request(&self, request: &mut RequestEnvelope) -> Result<(), ClientError> {
        let Some(token) = self.session.token().await? else {
            return Ok(());
        };
        let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ClientError::InvalidRequest("session token is not a valid header value".to_string())
        })?;
        request.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

// Scopes guest requests: identifiers go into the query of every request and
// into the body of mutating ones.
pub struct GuestIdentity {
    session: Session,
}

impl GuestIdentity {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl RequestMiddleware for GuestIdentity {
    async fn on_request(&self, request: &mut RequestEnvelope) -> Result<(), ClientError> {
        let context = self.session.guest_context().await?;
        if context.is_empty() {
            return Ok(());
        }

        for (key, value) in context.pairs() {
            if request.query_value(key).is_none() {
                request.query.push((key.to_string(), value.to_string()));
            }
        }

        if request.is_mutating() {
            merge_guest_fields(&mut request.body, &context);
        }
        Ok(())
    }
}

// Adds the guest identifiers to a JSON object body. Fields the caller already
// set are kept as they are.
pub fn merge_guest_fields(body: &mut Option<Value>, context: &GuestContext) {
    match body {
        None => {
            let fields: Map<String, Value> = context
                .pairs()
                .into_iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect();
            *body = Some(Value::Object(fields));
        }
        Some(Value::Object(fields)) => {
            for (key, value) in context.pairs() {
                match fields.get(key) {
                    None => {
                        fields.insert(key.to_string(), Value::String(value.to_string()));
                    }
                    Some(existing) if !same_identifier(existing, value) => {
                        tracing::warn!(
                            field = key,
                            "request body already sets a guest identifier; keeping caller value"
                        );
                    }
                    Some(_) => {}
                }
            }
        }
        Some(_) => {
            tracing::debug!("non-object request body left without guest identifiers");
        }
    }
}

fn same_identifier(existing: &Value, value: &str) -> bool {
    match existing {
        Value::String(s) => s == value,
        Value::Number(n) => n.to_string() == value,
        _ => false,
    }
}

// On 401: clears the stored token, then hands the sign-in route to the handler.
// The original error is still returned to the caller.
pub struct UnauthorizedRedirect {
    session: Session,
    handler: Arc<dyn UnauthorizedHandler>,
    sign_in_route: String,
}

impl UnauthorizedRedirect {
    pub fn new(
        session: Session,
        handler: Arc<dyn UnauthorizedHandler>,
        sign_in_route: impl Into<String>,
    ) -> Self {
        Self {
            session,
            handler,
            sign_in_route: sign_in_route.into(),
        }
    }
}

#[async_trait]
impl ResponseMiddleware for UnauthorizedRedirect {
    async fn on_response(
        &self,
        outcome: Result<ApiResponse, ClientError>,
    ) -> Result<ApiResponse, ClientError> {
        if matches!(&outcome, Err(err) if err.is_unauthorized()) {
            tracing::info!(route = %self.sign_in_route, "unauthorized response; signing out.");
            if let Err(err) = self.session.clear_token().await {
                tracing::warn!(error = %err, "failed to clear session token");
            }
            self.handler.on_unauthorized(&self.sign_in_route);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionKey;
    use crate::use_cases::test_support::RecordingStore;
    use reqwest::{Method, StatusCode};
    use serde_json::json;
    use std::sync::Mutex;

    fn guest_session(store: RecordingStore) -> Session {
        Session::new(Arc::new(
            store
                .seed(SessionKey::EmployeeId, "7")
                .seed(SessionKey::GuestId, "g-1"),
        ))
    }

    #[derive(Default)]
    struct RecordingHandler {
        routes: Mutex<Vec<String>>,
    }

    impl UnauthorizedHandler for RecordingHandler {
        fn on_unauthorized(&self, sign_in_route: &str) {
            self.routes
                .lock()
                .expect("routes mutex poisoned")
                .push(sign_in_route.to_string());
        }
    }

    #[tokio::test]
    async fn when_token_is_stored_then_bearer_header_is_set() {
        let store = RecordingStore::new().seed(SessionKey::Token, "abc");
        let middleware = BearerToken::new(Session::new(Arc::new(store)));
        let mut request = RequestEnvelope::new(Method::GET, "/user");

        middleware.on_request(&mut request).await.expect("middleware");

        assert_eq!(
            request.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc")
        );
    }

    #[tokio::test]
    async fn when_no_token_is_stored_then_no_authorization_header_is_set() {
        let middleware = BearerToken::new(Session::new(Arc::new(RecordingStore::new())));
        let mut request = RequestEnvelope::new(Method::GET, "/user");

        middleware.on_request(&mut request).await.expect("middleware");

        assert!(request.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn when_token_has_a_newline_then_returns_invalid_request() {
        let store = RecordingStore::new().seed(SessionKey::Token, "abc\ndef");
        let middleware = BearerToken::new(Session::new(Arc::new(store)));
        let mut request = RequestEnvelope::new(Method::GET, "/user");

        let result = middleware.on_request(&mut request).await;

        assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn when_guest_context_is_stored_then_get_query_carries_identifiers() {
        let middleware = GuestIdentity::new(guest_session(RecordingStore::new()));
        let mut request =
            RequestEnvelope::new(Method::GET, "/brand").with_query([("page", "2")]);

        middleware.on_request(&mut request).await.expect("middleware");

        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("employee_id"), Some("7"));
        assert_eq!(request.query_value("guest_id"), Some("g-1"));
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn when_caller_sets_query_identifier_then_it_is_not_duplicated() {
        let middleware = GuestIdentity::new(guest_session(RecordingStore::new()));
        let mut request =
            RequestEnvelope::new(Method::GET, "/brand").with_query([("employee_id", "9")]);

        middleware.on_request(&mut request).await.expect("middleware");

        let employee_ids: Vec<&str> = request
            .query
            .iter()
            .filter(|(k, _)| k == "employee_id")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(employee_ids, vec!["9"]);
    }

    #[tokio::test]
    async fn when_request_is_mutating_then_body_gains_identifiers_and_keeps_caller_fields() {
        let middleware = GuestIdentity::new(guest_session(RecordingStore::new()));
        let mut request = RequestEnvelope::new(Method::POST, "/guest")
            .with_body(json!({ "name": "Sam", "guest_id": "caller-guest" }));

        middleware.on_request(&mut request).await.expect("middleware");

        assert_eq!(
            request.body,
            Some(json!({ "name": "Sam", "guest_id": "caller-guest", "employee_id": "7" }))
        );
        assert_eq!(request.query_value("guest_id"), Some("g-1"));
    }

    #[tokio::test]
    async fn when_mutating_request_has_no_body_then_identifier_object_is_created() {
        let middleware = GuestIdentity::new(guest_session(RecordingStore::new()));
        let mut request = RequestEnvelope::new(Method::PATCH, "/guest");

        middleware.on_request(&mut request).await.expect("middleware");

        assert_eq!(
            request.body,
            Some(json!({ "employee_id": "7", "guest_id": "g-1" }))
        );
    }

    #[test]
    fn when_body_is_not_an_object_then_it_is_left_unchanged() {
        let context = GuestContext {
            employee_id: Some("7".to_string()),
            guest_id: None,
        };
        let mut body = Some(json!([1, 2, 3]));

        merge_guest_fields(&mut body, &context);

        assert_eq!(body, Some(json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn when_delete_is_sent_then_body_is_not_touched() {
        let middleware = GuestIdentity::new(guest_session(RecordingStore::new()));
        let mut request = RequestEnvelope::new(Method::DELETE, "/guest/1");

        middleware.on_request(&mut request).await.expect("middleware");

        assert!(request.body.is_none());
        assert_eq!(request.query_value("employee_id"), Some("7"));
    }

    #[tokio::test]
    async fn when_response_is_401_then_token_is_cleared_and_handler_runs_once() {
        let store = RecordingStore::new().seed(SessionKey::Token, "abc");
        let handler = Arc::new(RecordingHandler::default());
        let middleware = UnauthorizedRedirect::new(
            Session::new(Arc::new(store.clone())),
            handler.clone(),
            "/login",
        );

        let outcome = middleware
            .on_response(Err(ClientError::Http {
                status: StatusCode::UNAUTHORIZED,
                body: json!({ "message": "unauthenticated" }),
            }))
            .await;

        assert!(matches!(
            outcome,
            Err(ClientError::Http { status, .. }) if status == StatusCode::UNAUTHORIZED
        ));
        assert_eq!(store.value(SessionKey::Token), None);
        assert_eq!(
            *handler.routes.lock().expect("routes mutex poisoned"),
            vec!["/login".to_string()]
        );
    }

    #[tokio::test]
    async fn when_response_is_403_then_token_is_kept() {
        let store = RecordingStore::new().seed(SessionKey::Token, "abc");
        let handler = Arc::new(RecordingHandler::default());
        let middleware = UnauthorizedRedirect::new(
            Session::new(Arc::new(store.clone())),
            handler.clone(),
            "/login",
        );

        let _ = middleware
            .on_response(Err(ClientError::Http {
                status: StatusCode::FORBIDDEN,
                body: Value::Null,
            }))
            .await;

        assert_eq!(store.value(SessionKey::Token).as_deref(), Some("abc"));
        assert!(handler.routes.lock().expect("routes mutex poisoned").is_empty());
    }

    #[tokio::test]
    async fn when_pipeline_runs_then_request_middleware_apply_in_order() {
        struct SetHeader(&'static str);

        #[async_trait]
        impl RequestMiddleware for SetHeader {
            async fn on_request(&self, request: &mut RequestEnvelope) -> Result<(), ClientError> {
                request
                    .headers
                    .insert("x-step", HeaderValue::from_static(self.0));
                Ok(())
            }
        }

        let pipeline = Pipeline::new().request(SetHeader("first")).request(SetHeader("second"));
        let mut request = RequestEnvelope::new(Method::GET, "/brand");

        pipeline.apply_request(&mut request).await.expect("pipeline");

        assert_eq!(
            request.headers.get("x-step").and_then(|v| v.to_str().ok()),
            Some("second")
        );
    }
}
