use async_trait::async_trait;

use crate::domain::entities::Principal;

// Port for bearer token storage used by backend use cases.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert(&self, token: String, principal: Principal) -> Result<(), String>;
    async fn get(&self, token: &str) -> Result<Option<Principal>, String>;
    async fn remove(&self, token: &str) -> Result<bool, String>;
}
