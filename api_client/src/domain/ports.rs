use async_trait::async_trait;

use crate::domain::entities::SessionKey;
use crate::domain::errors::StoreError;

// Port for client-side session persistence. Each call is atomic on its own.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: SessionKey) -> Result<(), StoreError>;
}

// Invoked once per 401 response with the route the user should be sent to.
pub trait UnauthorizedHandler: Send + Sync {
    fn on_unauthorized(&self, sign_in_route: &str);
}

impl<F> UnauthorizedHandler for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_unauthorized(&self, sign_in_route: &str) {
        self(sign_in_route)
    }
}
