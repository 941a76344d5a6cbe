use serde::{Deserialize, Serialize};
use serde_json::Value;

// Wire types for the endpoints the dashboard and guest flow call.
// Only the fields the client relies on are modeled; the rest stay in `extra`.

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct GuestTokenRequest<'a> {
    pub table: &'a str,
}

// Identifiers issued when a table link is resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestToken {
    pub token: String,
    pub employee_id: Option<String>,
    pub guest_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Brand {
    pub name: String,
    // Relative to the asset origin.
    pub logo: Option<String>,
}

// Filter for order search and statistics; dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Statistics {
    pub orders: u64,
    pub revenue: f64,
}

// List endpoints answer with either a bare array or `{ "data": [...] }`.
pub fn list_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
