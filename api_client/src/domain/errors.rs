use reqwest::StatusCode;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

// Field name to server-reported messages, as returned with a 422.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// Errors surfaced by the client layer to calling code.
#[derive(Debug, Error)]
pub enum ClientError {
    // The request never produced a response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("http error {status}")]
    Http { status: StatusCode, body: Value },
    #[error("validation failed: {message}")]
    Validation { message: String, errors: FieldErrors },
    #[error("response decode error: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Validation { .. } => Some(StatusCode::UNPROCESSABLE_ENTITY),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    // First message reported for `field`, for inline form errors.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            ClientError::Validation { errors, .. } => errors
                .get(field)
                .and_then(|messages| messages.first())
                .map(String::as_str),
            _ => None,
        }
    }
}

// Errors raised by session persistence adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_error_is_validation_then_field_message_returns_first_entry() {
        let mut errors = FieldErrors::new();
        errors.insert(
            "email".to_string(),
            vec!["required".to_string(), "must be an email".to_string()],
        );
        let err = ClientError::Validation {
            message: "invalid".to_string(),
            errors,
        };

        assert_eq!(err.field_message("email"), Some("required"));
        assert_eq!(err.field_message("password"), None);
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[test]
    fn when_error_is_http_401_then_it_is_unauthorized() {
        let err = ClientError::Http {
            status: StatusCode::UNAUTHORIZED,
            body: Value::Null,
        };

        assert!(err.is_unauthorized());
        assert!(!ClientError::Decode("bad".to_string()).is_unauthorized());
    }
}
