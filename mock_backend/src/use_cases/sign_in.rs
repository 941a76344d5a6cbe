use uuid::Uuid;

use crate::domain::entities::{Account, Principal};
use crate::domain::errors::BackendError;
use crate::domain::ports::TokenStore;

// Result of a successful staff sign-in.
pub struct SignInResponse {
    pub token: String,
    pub account: Account,
}

// Staff sign-in use case with injected dependencies.
pub struct SignInUseCase<'a, S> {
    pub accounts: &'a [Account],
    pub store: S,
}

impl<S> SignInUseCase<'_, S>
where
    S: TokenStore,
{
    pub async fn execute(&self, email: &str, password: &str) -> Result<SignInResponse, BackendError> {
        let mut missing = Vec::new();
        if email.trim().is_empty() {
            missing.push(("email".to_string(), "The email field is required.".to_string()));
        }
        if password.is_empty() {
            missing.push((
                "password".to_string(),
                "The password field is required.".to_string(),
            ));
        }
        if !missing.is_empty() {
            return Err(BackendError::Validation(missing));
        }

        let account = self
            .accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email.trim()))
            .filter(|account| account.password == password)
            .ok_or(BackendError::InvalidCredentials)?;

        let token = Uuid::new_v4().to_string();
        self.store
            .insert(
                token.clone(),
                Principal::Staff {
                    account_id: account.id,
                },
            )
            .await
            .map_err(|_| BackendError::StorageFailure)?;

        Ok(SignInResponse {
            token,
            account: account.clone(),
        })
    }
}
