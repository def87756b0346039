//! Configuration management for the synchronizer.

use std::env;
use std::time::Duration;

/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default collection path, relative to the base URL.
const DEFAULT_COLLECTION_PATH: &str = "/collection";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Path of the ordered collection, e.g. `/api/admin/quiz/42/questions`
    pub collection_path: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Per-request timeout; a timeout counts as a failed request
    pub request_timeout: Duration,
}

impl Config {
    /// Create a configuration with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            collection_path: DEFAULT_COLLECTION_PATH.to_string(),
            token: None,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("API_BASE_URL").ok_or(ConfigError::MissingBaseUrl)?;

        let collection_path =
            lookup("COLLECTION_PATH").unwrap_or_else(|| DEFAULT_COLLECTION_PATH.to_string());

        let token = lookup("API_TOKEN").filter(|t| !t.is_empty());

        let timeout_ms = match lookup("REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            collection_path,
            token,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Set the collection path, builder style.
    pub fn with_collection_path(mut self, path: impl Into<String>) -> Self {
        self.collection_path = path.into();
        self
    }

    /// Set the request timeout, builder style.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the bearer token, builder style.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Full URL of the collection.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.collection_path.trim_matches('/')
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_BASE_URL environment variable is required")]
    MissingBaseUrl,

    #[error("Invalid REQUEST_TIMEOUT_MS value")]
    InvalidTimeout,
}
