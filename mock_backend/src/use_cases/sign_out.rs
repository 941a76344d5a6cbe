use crate::domain::errors::BackendError;
use crate::domain::ports::TokenStore;

// Revokes a bearer token; staff and guest tokens alike.
pub struct SignOutUseCase<S> {
    pub store: S,
}

impl<S> SignOutUseCase<S>
where
    S: TokenStore,
{
    // Returns whether a live token was actually revoked.
    pub async fn execute(&self, token: &str) -> Result<bool, BackendError> {
        if token.is_empty() {
            return Ok(false);
        }

        let revoked = self
            .store
            .remove(token)
            .await
            .map_err(|_| BackendError::StorageFailure)?;
        tracing::debug!(revoked, "token revoked.");
        Ok(revoked)
    }
}
