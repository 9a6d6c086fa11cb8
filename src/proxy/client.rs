use async_trait::async_trait;
use mockall::automock;
use reqwest::Url;
use tracing::debug;

use crate::proxy::errors::{ProxyError, Result};

/// Status and raw body of an upstream reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP seam of the proxy
#[automock]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Perform a single GET. Non-2xx statuses are not errors at this level.
    async fn get(&self, url: &Url) -> Result<UpstreamResponse>;
}

/// `reqwest` implementation. No retries and no timeout beyond reqwest's defaults.
#[derive(Clone, Default)]
pub struct HttpUpstreamClient {
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse> {
        // The query string holds the API key, log the path only
        debug!(path = url.path(), "Sending upstream request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Transport(e.without_url().to_string()))?;

        Ok(UpstreamResponse { status, body })
    }
}
