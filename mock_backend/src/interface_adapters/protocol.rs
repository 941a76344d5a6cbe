use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::{Account, Order};

// Request payload for staff sign-in. Missing fields become blanks so the
// use case can report them as field errors.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Account,
}

#[derive(Debug, Deserialize)]
pub struct GuestTokenRequest {
    #[serde(default)]
    pub table: String,
}

#[derive(Debug, Serialize)]
pub struct GuestTokenResponse {
    pub token: String,
    pub employee_id: String,
    pub guest_id: String,
}

#[derive(Debug, Serialize)]
pub struct BrandResponse {
    pub name: String,
    // Relative to the asset origin.
    pub logo: String,
}

// Filter body for order search and statistics; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct OrderSearchRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderSearchResponse {
    pub data: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub revoked: bool,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

// 422 envelope: `errors` maps each field to its messages.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub message: String,
    pub errors: Map<String, Value>,
}
