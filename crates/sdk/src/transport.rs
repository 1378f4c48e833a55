//! HTTP transport layer for the Qualer SDK.
//!
//! One shared `reqwest::Client` carrying the bearer credential and a
//! bounded timeout. The transport returns raw JSON bodies for 2xx
//! responses and classified errors for everything else; it never retries
//! and never logs the credential.

use crate::config::ClientConfig;
use crate::error::{QualerError, QualerResult};
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// HTTP transport for making Qualer API requests.
///
/// Holds no per-call mutable state; safe for concurrent use.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    ///
    /// Fails with a configuration error if the credential is empty or
    /// not a valid header value.
    pub fn new(config: Arc<ClientConfig>) -> QualerResult<Self> {
        if config.token.is_empty() {
            return Err(QualerError::Config("bearer token must not be empty".to_string()));
        }

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| QualerError::Config("invalid bearer token format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> QualerResult<url::Url> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| QualerError::Invalid(format!("invalid request path: {}", e)))
    }

    /// Execute a GET request, returning the raw JSON body on 2xx.
    pub async fn get(&self, path: &str) -> QualerResult<Value> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");
        self.execute(self.client.get(url)).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> QualerResult<Value> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");
        self.execute(self.client.get(url).query(query)).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> QualerResult<Value> {
        let response = request.send().await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QualerError::from_status(status, &body));
        }

        // A partially-received or non-JSON body never becomes an entity.
        let body: Value = response.json().await?;
        Ok(body)
    }
}
