use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::proxy::errors::ProxyError;

pub const DEFAULT_CHAIN: &str = "bitcoin";

/// Body of a proxy call: `{ action, chain?, address?, txHash? }`
///
/// Fields stay loosely typed here so that every missing or malformed field
/// can be reported with its own message by the proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl ProxyRequest {
    pub fn new(action: Action, chain: impl Into<String>) -> Self {
        Self {
            action: Some(action.as_str().to_string()),
            chain: Some(chain.into()),
            ..Default::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_tx_hash(mut self, tx_hash: impl Into<String>) -> Self {
        self.tx_hash = Some(tx_hash.into());
        self
    }

    /// Lower-cased chain, falling back to bitcoin when absent or blank
    pub fn chain(&self) -> String {
        self.chain
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CHAIN)
            .to_lowercase()
    }

    pub fn action(&self) -> Result<Action, ProxyError> {
        match self.action.as_deref().map(str::trim) {
            None | Some("") => Err(ProxyError::MissingAction),
            Some(action) => action.parse(),
        }
    }
}

/// The four lookups the proxy forwards to Blockchair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Address,
    Transaction,
    Latest,
    Stats,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Address => "address",
            Action::Transaction => "transaction",
            Action::Latest => "latest",
            Action::Stats => "stats",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(Action::Address),
            "transaction" => Ok(Action::Transaction),
            "latest" => Ok(Action::Latest),
            "stats" => Ok(Action::Stats),
            _ => Err(ProxyError::InvalidAction),
        }
    }
}
