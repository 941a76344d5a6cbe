use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{name} is not a valid url: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{name} must be a positive number of milliseconds")]
    InvalidTimeout { name: &'static str },
}

// Runtime settings for the API clients.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    // JSON API origin.
    pub api_base_url: String,
    // Origin used to resolve relative image paths.
    pub asset_base_url: String,
    // Route handed to the unauthorized handler by the admin clients.
    pub sign_in_route: String,
    // Same, for the guest client.
    pub guest_sign_in_route: String,
    pub request_timeout_ms: u64,
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            asset_base_url: "http://127.0.0.1:8000".to_string(),
            sign_in_route: "/login".to_string(),
            guest_sign_in_route: "/".to_string(),
            request_timeout_ms: 10_000,
            session_file: None,
        }
    }
}

impl ClientConfig {
    // Reads `API_BASE_URL`, `ASSET_BASE_URL`, `SIGN_IN_ROUTE`,
    // `GUEST_SIGN_IN_ROUTE`, `REQUEST_TIMEOUT_MS` and `SESSION_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout = match env::var("REQUEST_TIMEOUT_MS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout {
                    name: "REQUEST_TIMEOUT_MS",
                })?,
            Err(_) => defaults.request_timeout_ms,
        };

        let config = Self {
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            asset_base_url: env::var("ASSET_BASE_URL").unwrap_or(defaults.asset_base_url),
            sign_in_route: env::var("SIGN_IN_ROUTE").unwrap_or(defaults.sign_in_route),
            guest_sign_in_route: env::var("GUEST_SIGN_IN_ROUTE")
                .unwrap_or(defaults.guest_sign_in_route),
            request_timeout_ms: timeout,
            session_file: env::var_os("SESSION_FILE").map(PathBuf::from),
        };
        config.validate()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        Url::parse(&self.api_base_url).map_err(|source| ConfigError::InvalidUrl {
            name: "api_base_url",
            source,
        })?;
        Url::parse(&self.asset_base_url).map_err(|source| ConfigError::InvalidUrl {
            name: "asset_base_url",
            source,
        })?;
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout {
                name: "request_timeout_ms",
            });
        }
        Ok(self)
    }
}
