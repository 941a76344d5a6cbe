use std::sync::Arc;

use crate::domain::{GuestContext, Locale, SessionKey, SessionStore, StoreError};

// Explicit session context shared by every client built from it.
// Values are read right before each request, never cached here.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    // Empty strings count as absent so no blank bearer header is ever sent.
    async fn read(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(key).await?.filter(|value| !value.is_empty()))
    }

    pub async fn token(&self) -> Result<Option<String>, StoreError> {
        self.read(SessionKey::Token).await
    }

    pub async fn set_token(&self, token: &str) -> Result<(), StoreError> {
        tracing::debug!("session token stored.");
        self.store.set(SessionKey::Token, token).await
    }

    pub async fn clear_token(&self) -> Result<(), StoreError> {
        tracing::debug!("session token cleared.");
        self.store.remove(SessionKey::Token).await
    }

    pub async fn guest_context(&self) -> Result<GuestContext, StoreError> {
        Ok(GuestContext {
            employee_id: self.read(SessionKey::EmployeeId).await?,
            guest_id: self.read(SessionKey::GuestId).await?,
        })
    }

    // Replaces the whole context; identifiers absent from `context` are removed.
    pub async fn set_guest_context(&self, context: &GuestContext) -> Result<(), StoreError> {
        for (key, value) in [
            (SessionKey::EmployeeId, context.employee_id.as_deref()),
            (SessionKey::GuestId, context.guest_id.as_deref()),
        ] {
            match value {
                Some(value) => self.store.set(key, value).await?,
                None => self.store.remove(key).await?,
            }
        }
        Ok(())
    }

    pub async fn clear_guest_context(&self) -> Result<(), StoreError> {
        self.set_guest_context(&GuestContext::default()).await
    }

    pub async fn locale(&self) -> Result<Locale, StoreError> {
        Ok(self
            .read(SessionKey::Locale)
            .await?
            .map(|code| Locale::from_code(&code))
            .unwrap_or_default())
    }

    pub async fn set_locale(&self, locale: Locale) -> Result<(), StoreError> {
        self.store.set(SessionKey::Locale, locale.code()).await
    }

    // Drops credentials and guest scope; the locale preference survives.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.clear_token().await?;
        self.clear_guest_context().await
    }
}
