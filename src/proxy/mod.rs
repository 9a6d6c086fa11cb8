// Blockchair proxy - the single point of egress to the data provider.
// Holds the credential, turns a ProxyRequest into exactly one upstream GET
// and maps the reply onto either the raw JSON payload or a ProxyError.

pub mod client;
pub mod errors;

use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::ProxyConfig;
use crate::models::request::{Action, ProxyRequest};
use client::{HttpUpstreamClient, UpstreamClient, UpstreamResponse};
use errors::{ProxyError, Result};

/// Number of transactions requested by the `latest` action
pub const LATEST_TRANSACTIONS_LIMIT: u32 = 10;

pub struct BlockchairProxy {
    config: ProxyConfig,
    client: Arc<dyn UpstreamClient>,
}

impl BlockchairProxy {
    pub fn new(config: ProxyConfig, client: Arc<dyn UpstreamClient>) -> Self {
        Self { config, client }
    }

    pub fn with_http_client(config: ProxyConfig) -> Self {
        Self::new(config, Arc::new(HttpUpstreamClient::new()))
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Build the upstream URL for a request, or explain why none can be built
    pub fn upstream_url(&self, request: &ProxyRequest) -> Result<Url> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProxyError::MissingCredential)?;

        let action = request.action()?;
        let chain = request.chain();

        let mut url = self.config.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ProxyError::InvalidProviderUrl(self.config.base_url.to_string()))?;
            segments.pop_if_empty().push(&chain);

            match action {
                Action::Address | Action::Latest => {
                    let address = required(&request.address).ok_or(ProxyError::MissingAddress {
                        lookup: if action == Action::Latest {
                            "latest transactions"
                        } else {
                            "address"
                        },
                    })?;
                    segments.extend(["dashboards", "address", address]);
                }
                Action::Transaction => {
                    let tx_hash = required(&request.tx_hash).ok_or(ProxyError::MissingTxHash)?;
                    segments.extend(["dashboards", "transaction", tx_hash]);
                }
                Action::Stats => {
                    segments.push("stats");
                }
            }
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", api_key);
            if action == Action::Latest {
                query
                    .append_pair("limit", &LATEST_TRANSACTIONS_LIMIT.to_string())
                    .append_pair("transaction_details", "true");
            }
        }

        Ok(url)
    }

    /// Forward one request to Blockchair and return its JSON payload verbatim
    #[tracing::instrument(skip(self, request), fields(action = ?request.action, chain = %request.chain()))]
    pub async fn forward(&self, request: &ProxyRequest) -> Result<Value> {
        let url = self.upstream_url(request)?;
        // upstream_url already rejected a missing or unknown action
        let action = request.action()?;
        let chain = request.chain();

        info!("Fetching from Blockchair: {} for chain {}", action, chain);

        let response = self.client.get(&url).await.map_err(|e| {
            error!(error = %e, "Blockchair request failed");
            e
        })?;

        interpret_response(response, action, &chain)
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Translate an upstream reply into the proxy's result
pub fn interpret_response(response: UpstreamResponse, action: Action, chain: &str) -> Result<Value> {
    if response.status == 404 {
        warn!(status = 404, "Blockchair resource not found");
        return Err(ProxyError::NotFound {
            subject: match action {
                Action::Transaction => "transaction hash",
                Action::Address | Action::Latest => "address",
                Action::Stats => "chain",
            },
            chain: chain.to_string(),
        });
    }

    if !response.is_success() {
        error!(status = response.status, body = %response.body, "Blockchair API error");
        return Err(ProxyError::Upstream {
            status: response.status,
        });
    }

    let payload: Value = serde_json::from_str(&response.body).map_err(|e| {
        error!(error = %e, "Blockchair returned malformed JSON");
        ProxyError::InvalidResponse
    })?;

    match payload.pointer("/context/error") {
        None | Some(Value::Null) => Ok(payload),
        Some(Value::String(message)) => Err(ProxyError::Provider(message.clone())),
        Some(other) => Err(ProxyError::Provider(other.to_string())),
    }
}
