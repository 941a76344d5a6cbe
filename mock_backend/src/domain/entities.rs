use serde::{Deserialize, Serialize};
use serde_json::Value;

// Staff account that can sign in to the admin dashboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

// Restaurant table reachable through a QR link, served by one employee.
#[derive(Clone, Debug)]
pub struct Table {
    pub code: String,
    pub employee_id: String,
}

// Who a bearer token was issued to.
#[derive(Clone, Debug, PartialEq)]
pub enum Principal {
    Staff {
        account_id: u64,
    },
    Guest {
        table: String,
        employee_id: String,
        guest_id: String,
    },
}

// Order row used by the search and statistics endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub status: String,
    pub total: f64,
    // Calendar date in YYYY-MM-DD.
    pub created_at: String,
    pub employee_id: Option<String>,
}

// Generic stored resource row (supplier, unit, tax rate, ...).
pub type Record = serde_json::Map<String, Value>;
