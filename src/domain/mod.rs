// Domain layer - validation and dashboard logic with no HTTP concerns.
// Used by the typed API handlers; the raw proxy endpoint bypasses it.

pub mod chain;
pub mod dashboard;
pub mod validation;

use crate::proxy::errors::ProxyError;
use validation::ValidationError;

// Domain error type - no HTTP concerns
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error("{0}")]
    NotFound(String),

    #[error("Unexpected response from provider: {0}")]
    Malformed(String),
}

// Re-export commonly used types and functions
pub use chain::Chain;
pub use dashboard::{
    fetch_address_summary, fetch_blockchain_stats, fetch_latest_transactions,
    fetch_transaction_details,
};
pub use validation::{validate_address, validate_chain, validate_transaction_hash};
