use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::domain::entities::{Account, Order, Principal, Record, Table};
use crate::domain::ports::TokenStore;

// Resource collections served by the generic CRUD routes.
pub const RESOURCES: &[&str] = &[
    "inventory",
    "supplier",
    "unit",
    "service",
    "tax-rate",
    "payment-method",
];

// One request as the backend received it.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    // Parsed only for JSON bodies.
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

// Shared log of every request the backend has seen, in arrival order.
#[derive(Clone, Default)]
pub struct RequestLog {
    entries: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RequestLog {
    pub async fn record(&self, request: RecordedRequest) {
        self.entries.lock().await.push(request);
    }

    pub async fn entries(&self) -> Vec<RecordedRequest> {
        self.entries.lock().await.clone()
    }

    pub async fn last_for(&self, path: &str) -> Option<RecordedRequest> {
        self.entries
            .lock()
            .await
            .iter()
            .rev()
            .find(|entry| entry.path == path)
            .cloned()
    }
}

// Application state holding accounts, tokens and resource rows.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<Mutex<HashMap<String, Principal>>>,
    pub accounts: Arc<Vec<Account>>,
    pub tables: Arc<Vec<Table>>,
    pub resources: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    pub orders: Arc<Mutex<Vec<Order>>>,
    pub next_id: Arc<AtomicU64>,
    pub requests: RequestLog,
}

impl AppState {
    pub fn new(accounts: Vec<Account>, tables: Vec<Table>) -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            accounts: Arc::new(accounts),
            tables: Arc::new(tables),
            resources: Arc::new(Mutex::new(HashMap::new())),
            orders: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            requests: RequestLog::default(),
        }
    }

    // Single admin account and table used by local development and tests.
    pub fn seeded(email: &str, password: &str) -> Self {
        Self::new(
            vec![Account {
                id: 1,
                name: "Manager".to_string(),
                email: email.to_string(),
                password: password.to_string(),
            }],
            vec![Table {
                code: "T1".to_string(),
                employee_id: "7".to_string(),
            }],
        )
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            ..self
        }
    }

    pub async fn insert_token(&self, token: impl Into<String>, principal: Principal) {
        self.tokens.lock().await.insert(token.into(), principal);
    }

    pub fn token_store(&self) -> InMemoryTokenStore {
        InMemoryTokenStore {
            tokens: self.tokens.clone(),
        }
    }

    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

// In-memory token store adapter for the backend.
#[derive(Clone)]
pub struct InMemoryTokenStore {
    pub tokens: Arc<Mutex<HashMap<String, Principal>>>,
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn insert(&self, token: String, principal: Principal) -> Result<(), String> {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(token, principal);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Principal>, String> {
        let tokens = self.tokens.lock().await;
        Ok(tokens.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        let mut tokens = self.tokens.lock().await;
        Ok(tokens.remove(token).is_some())
    }
}
