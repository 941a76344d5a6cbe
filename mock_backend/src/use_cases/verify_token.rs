use crate::domain::entities::Principal;
use crate::domain::errors::BackendError;
use crate::domain::ports::TokenStore;

// Bearer token verification use case with injected dependencies.
pub struct VerifyTokenUseCase<S> {
    pub store: S,
}

impl<S> VerifyTokenUseCase<S>
where
    S: TokenStore,
{
    pub async fn execute(&self, token: &str) -> Result<Principal, BackendError> {
        if token.is_empty() {
            return Err(BackendError::Unauthenticated);
        }

        self.store
            .get(token)
            .await
            .map_err(|_| BackendError::StorageFailure)?
            .ok_or(BackendError::Unauthenticated)
    }
}

// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let value = header?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
