use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{Account, Principal};
use crate::domain::ports::TokenStore;

pub(crate) type TokenTable = Arc<Mutex<HashMap<String, Principal>>>;

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub get: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    tokens: TokenTable,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_token(&self, token: impl Into<String>, principal: Principal) {
        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(token.into(), principal);
    }

    pub(crate) fn get_test_principal(&self, token: &str) -> Option<Principal> {
        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.get(token).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.lock().expect("tokens mutex poisoned").len()
    }
}

#[async_trait]
impl TokenStore for RecordingStore {
    async fn insert(&self, token: String, principal: Principal) -> Result<(), String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(token, principal);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Principal>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.remove(token).is_some())
    }
}

pub(crate) fn test_account() -> Account {
    Account {
        id: 1,
        name: "Manager".to_string(),
        email: "admin@example.com".to_string(),
        password: "secret".to_string(),
    }
}
