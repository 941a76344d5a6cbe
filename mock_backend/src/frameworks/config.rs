use std::env;

// Runtime settings for the mock backend, read from the environment.

pub fn http_port() -> u16 {
    env::var("MOCK_BACKEND_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000)
}

pub fn admin_email() -> String {
    env::var("MOCK_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string())
}

pub fn admin_password() -> String {
    env::var("MOCK_ADMIN_PASSWORD").unwrap_or_else(|_| "secret".to_string())
}
