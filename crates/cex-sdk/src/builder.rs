//! Client builder
//!
//! Fluent configuration for [`CexClient`](crate::client::CexClient) with
//! sensible defaults and validation.
//!
//! # Example
//!
//! ```
//! use cex_sdk::builder::CexClientBuilder;
//!
//! let client = CexClientBuilder::new()
//!     .with_timeout(std::time::Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```

use cex_auth::Credentials;
use std::time::Duration;

use crate::client::CexClient;

/// Production REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://cex.io";

/// Configuration validation error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Base URL must be http(s) and non-empty
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// Timeout too short
    #[error("request timeout must be at least 1 second")]
    TimeoutTooShort,

    /// Underlying HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Builder for configuring a [`CexClient`]
#[derive(Debug, Clone)]
pub struct CexClientBuilder {
    /// REST base URL (no trailing slash)
    pub base_url: String,

    /// Credentials for private endpoints, if any
    pub credentials: Option<Credentials>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for CexClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl CexClientBuilder {
    /// Create a builder with defaults (public endpoints only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the REST base URL (useful for test servers)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Attach credentials, enabling private endpoints
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration and build the client
    pub fn build(self) -> Result<CexClient, ConfigError> {
        if self.base_url.is_empty() || !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidBaseUrl { url: self.base_url });
        }
        if self.timeout < Duration::from_secs(1) {
            return Err(ConfigError::TimeoutTooShort);
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("cex-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let base_url = self.base_url.trim_end_matches('/').to_string();
        Ok(CexClient::from_parts(http, base_url, self.credentials))
    }
}
