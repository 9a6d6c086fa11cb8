pub mod api;
pub mod config;
pub mod domain;
pub mod models;
pub mod proxy;
pub mod secrets;
pub mod telemetry;

// Re-export commonly used types
pub use config::{ConfigError, ProxyConfig};

pub use domain::{
    validate_address, validate_chain, validate_transaction_hash, Chain, DomainError,
};

pub use domain::validation::ValidationError;

pub use models::{
    Action, AddressSummary, LatestTransactionEntry, ProxyRequest, TransactionDetail,
    TransferEntry,
};

pub use proxy::{
    client::{HttpUpstreamClient, MockUpstreamClient, UpstreamClient, UpstreamResponse},
    errors::ProxyError,
    BlockchairProxy,
};
