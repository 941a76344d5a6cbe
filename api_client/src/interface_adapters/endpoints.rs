use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{ClientError, FilePart, GuestContext, RequestEnvelope};
use crate::interface_adapters::clients::{AuthenticatedClient, GuestAuthenticatedClient};
use crate::interface_adapters::protocol::{
    Brand, GuestToken, GuestTokenRequest, LoginRequest, LoginResponse, OrderSearch, Statistics,
    User, list_items,
};
use crate::use_cases::Session;
use crate::use_cases::dates;

// Admin collections managed through the generic CRUD routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Inventory,
    Supplier,
    Unit,
    Service,
    TaxRate,
    PaymentMethod,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Inventory => "/inventory",
            Resource::Supplier => "/supplier",
            Resource::Unit => "/unit",
            Resource::Service => "/service",
            Resource::TaxRate => "/tax-rate",
            Resource::PaymentMethod => "/payment-method",
        }
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|err| ClientError::InvalidRequest(err.to_string()))
}

// Typed calls used by the admin dashboard.
#[derive(Clone)]
pub struct AdminApi {
    client: AuthenticatedClient,
    session: Session,
}

impl AdminApi {
    pub fn new(client: AuthenticatedClient, session: Session) -> Self {
        Self { client, session }
    }

    // Signs in and persists the issued token for later requests.
    #[tracing::instrument(name = "admin_login", skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let body = to_body(&LoginRequest { email, password })?;
        let response: LoginResponse = self
            .client
            .post("/login", Some(body), &[])
            .await?
            .json()?;
        self.session.set_token(&response.token).await?;
        tracing::info!(user_id = response.user.id, "signed in.");
        Ok(response.user)
    }

    // Revokes the token server-side, then forgets it locally even if revocation failed.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let revoked = self.client.post("/logout", None, &[]).await;
        self.session.sign_out().await?;
        if let Err(err) = &revoked {
            tracing::warn!(error = %err, "token revocation failed.");
        }
        revoked.map(|_| ())
    }

    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.client.get("/user", None, &[]).await?.json()
    }

    pub async fn list(&self, resource: Resource) -> Result<Vec<Value>, ClientError> {
        let response = self.client.get(resource.path(), None, &[]).await?;
        Ok(list_items(response.body))
    }

    pub async fn create(&self, resource: Resource, body: Value) -> Result<Value, ClientError> {
        Ok(self.client.post(resource.path(), Some(body), &[]).await?.body)
    }

    // Create with attachments, e.g. an inventory item image.
    pub async fn create_with_files(
        &self,
        resource: Resource,
        body: Value,
        files: Vec<FilePart>,
    ) -> Result<Value, ClientError> {
        let request = files.into_iter().fold(
            RequestEnvelope::new(Method::POST, resource.path()).with_body(body),
            RequestEnvelope::with_file,
        );
        Ok(self.client.send(request).await?.body)
    }

    // Updates go through POST with a `_method=put` override field.
    pub async fn update(
        &self,
        resource: Resource,
        id: u64,
        body: Value,
    ) -> Result<Value, ClientError> {
        let mut body = match body {
            Value::Object(fields) => fields,
            _ => {
                return Err(ClientError::InvalidRequest(
                    "update body must be a JSON object".to_string(),
                ));
            }
        };
        body.insert("_method".to_string(), json!("put"));

        let path = format!("{}/{id}", resource.path());
        Ok(self.client.post(&path, Some(Value::Object(body)), &[]).await?.body)
    }

    pub async fn remove(&self, resource: Resource, id: u64) -> Result<(), ClientError> {
        let path = format!("{}/{id}", resource.path());
        self.client.delete(&path, None, &[]).await?;
        Ok(())
    }

    pub async fn search_orders(&self, search: &OrderSearch) -> Result<Vec<Value>, ClientError> {
        let response = self
            .client
            .post("/search-order", Some(to_body(search)?), &[])
            .await?;
        Ok(list_items(response.body))
    }

    // Default dashboard window: the last 30 days up to today.
    pub async fn recent_orders(&self) -> Result<Vec<Value>, ClientError> {
        self.search_orders(&OrderSearch {
            from: Some(dates::month_ago()),
            to: Some(dates::today()),
            status: None,
        })
        .await
    }

    pub async fn statistics(&self, search: &OrderSearch) -> Result<Statistics, ClientError> {
        self.client
            .post("/get-statistics", Some(to_body(search)?), &[])
            .await?
            .json()
    }
}

// Typed calls used by the guest ordering flow.
#[derive(Clone)]
pub struct GuestApi {
    client: GuestAuthenticatedClient,
    session: Session,
}

impl GuestApi {
    pub fn new(client: GuestAuthenticatedClient, session: Session) -> Self {
        Self { client, session }
    }

    // Resolves a table link. The issued token and identifiers supersede any
    // previous guest context.
    #[tracing::instrument(name = "resolve_table", skip(self))]
    pub async fn resolve_table(&self, table: &str) -> Result<GuestToken, ClientError> {
        self.session.clear_guest_context().await?;

        let body = to_body(&GuestTokenRequest { table })?;
        let issued: GuestToken = self
            .client
            .post("/get-token", Some(body), &[])
            .await?
            .json()?;

        self.session.set_token(&issued.token).await?;
        self.session
            .set_guest_context(&GuestContext {
                employee_id: issued.employee_id.clone(),
                guest_id: issued.guest_id.clone(),
            })
            .await?;
        tracing::info!(employee_id = ?issued.employee_id, "guest associated with table.");
        Ok(issued)
    }

    pub async fn register(&self, details: Value) -> Result<Value, ClientError> {
        Ok(self.client.post("/guest", Some(details), &[]).await?.body)
    }

    pub async fn whoami(&self) -> Result<Value, ClientError> {
        Ok(self.client.get("/user", None, &[]).await?.body)
    }

    pub async fn brand(&self) -> Result<Brand, ClientError> {
        self.client.get("/brand", None, &[]).await?.json()
    }
}
