//! Main client for the Qualer SDK.

use crate::api::{AssetsApi, DocumentsApi, ServiceOrdersApi};
use crate::config::ClientConfig;
use crate::error::{QualerError, QualerResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

/// Client for interacting with the Qualer API.
#[derive(Debug, Clone)]
pub struct QualerClient {
    #[allow(dead_code)]
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl QualerClient {
    /// Create a new client builder.
    pub fn builder() -> QualerClientBuilder {
        QualerClientBuilder::new()
    }

    /// Create a client from the process environment
    /// (`QUALER_BASE_URL`, `QUALER_TOKEN`).
    pub fn from_env() -> QualerResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> QualerResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;
        Ok(Self { config, http })
    }

    /// Get the service orders API.
    pub fn service_orders(&self) -> ServiceOrdersApi<'_> {
        ServiceOrdersApi::new(self)
    }

    /// Get the assets API.
    pub fn assets(&self) -> AssetsApi<'_> {
        AssetsApi::new(self)
    }

    /// Get the documents API.
    pub fn documents(&self) -> DocumentsApi<'_> {
        DocumentsApi::new(self)
    }
}

/// Builder for creating a [`QualerClient`].
pub struct QualerClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Duration,
}

impl QualerClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the Qualer deployment.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token for authentication.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> QualerResult<QualerClient> {
        let base_url_str = self
            .base_url
            .unwrap_or_else(|| crate::config::DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url_str)
            .map_err(|e| QualerError::Config(format!("invalid base URL: {}", e)))?;
        let token = self
            .token
            .ok_or_else(|| QualerError::Config("token is required".to_string()))?;

        let mut config = ClientConfig::new(base_url, token);
        config.timeout = self.timeout;
        QualerClient::from_config(config)
    }
}

impl Default for QualerClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A process-wide client slot, materialized at most once on first use.
///
/// The credential check is deferred to the first real operation so the
/// host can list capabilities before configuration is complete. The cell
/// guards against double-initialization races; a failed initialization is
/// reported on every call until the environment is fixed (which, for a
/// process-scoped environment, means a restart).
pub struct SharedClient {
    cell: OnceCell<QualerClient>,
}

impl SharedClient {
    /// Create an empty slot that initializes from the environment on
    /// first use.
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Create a slot pre-filled with a client. Used by tests and by
    /// callers that own configuration explicitly.
    pub fn with_client(client: QualerClient) -> Self {
        Self {
            cell: OnceCell::new_with(Some(client)),
        }
    }

    /// Get the shared client, initializing it from the environment if
    /// this is the first use.
    pub async fn get(&self) -> QualerResult<&QualerClient> {
        self.cell
            .get_or_try_init(|| async { QualerClient::from_env() })
            .await
    }
}

impl Default for SharedClient {
    fn default() -> Self {
        Self::new()
    }
}
