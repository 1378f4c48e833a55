//! Configuration types for the Qualer SDK.

use crate::error::{QualerError, QualerResult};
use std::time::Duration;
use url::Url;

/// Default Qualer deployment used when `QUALER_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://jgiquality.qualer.com";

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "QUALER_BASE_URL";

/// Environment variable holding the bearer credential.
pub const ENV_TOKEN: &str = "QUALER_TOKEN";

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Qualer client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Qualer deployment.
    pub base_url: Url,
    /// Bearer token for authentication. Required.
    pub token: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with the given base URL and token.
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            base_url,
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// `QUALER_BASE_URL` is optional and defaults to the production
    /// deployment; `QUALER_TOKEN` is required and its absence is a
    /// configuration error.
    pub fn from_env() -> QualerResult<Self> {
        let base_url_str =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url_str).map_err(|e| {
            QualerError::Config(format!("{} is not a valid URL: {}", ENV_BASE_URL, e))
        })?;

        let token = std::env::var(ENV_TOKEN).ok().filter(|t| !t.is_empty());
        let token = token.ok_or_else(|| {
            QualerError::Config(format!(
                "{} environment variable is required. \
                 Set it in your shell or MCP client config.",
                ENV_TOKEN
            ))
        })?;

        Ok(Self::new(base_url, token))
    }
}
