//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables so the same
//! build can point at a local backend or a deployed one.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Backend address used when `LEARNLOOP_API_BASE` is unset
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Request timeout used when `LEARNLOOP_REQUEST_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend REST service, without a trailing slash
    pub api_base: String,

    /// Transport provider (http, mock)
    pub transport: String,

    /// Per-request timeout applied by the HTTP transport
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            transport: "http".to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let api_base = env::var("LEARNLOOP_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let transport = env::var("LEARNLOOP_TRANSPORT").unwrap_or_else(|_| "http".to_string());

        let request_timeout = match env::var("LEARNLOOP_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        name: "LEARNLOOP_REQUEST_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let config = Self::new(api_base)
            .with_transport(transport)
            .with_request_timeout(request_timeout);

        tracing::debug!(api_base = %config.api_base, transport = %config.transport, "Client configuration loaded");
        Ok(config)
    }

    /// Configuration pointing at the given backend with default settings
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = transport.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Join a backend-relative path onto the base URL
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }
}
