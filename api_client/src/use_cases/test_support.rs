use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{SessionKey, SessionStore, StoreError};

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
}

// Session store double that lets tests seed and inspect persisted keys.
#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    values: Arc<Mutex<HashMap<SessionKey, String>>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn seed(self, key: SessionKey, value: &str) -> Self {
        self.values
            .lock()
            .expect("values mutex poisoned")
            .insert(key, value.to_string());
        self
    }

    pub(crate) fn value(&self, key: SessionKey) -> Option<String> {
        self.values
            .lock()
            .expect("values mutex poisoned")
            .get(&key)
            .cloned()
    }
}

fn injected_failure() -> StoreError {
    StoreError::Io(std::io::Error::other("injected failure"))
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        if self.failures.get {
            return Err(injected_failure());
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        if self.failures.set {
            return Err(injected_failure());
        }
        let mut guard = self.values.lock().expect("values mutex poisoned");
        guard.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        let mut guard = self.values.lock().expect("values mutex poisoned");
        guard.remove(&key);
        Ok(())
    }
}
