use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("BLOCKCHAIR_API_KEY is not configured")]
    MissingCredential,

    #[error("Invalid provider URL: {0}")]
    InvalidProviderUrl(String),

    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    #[error("Action is required")]
    MissingAction,

    #[error("Invalid action. Use: address, transaction, latest, or stats")]
    InvalidAction,

    #[error("Address is required for {lookup} lookup")]
    MissingAddress { lookup: &'static str },

    #[error("Transaction hash is required for transaction lookup")]
    MissingTxHash,

    #[error("Resource not found. Please verify the {subject} is valid for {chain}")]
    NotFound { subject: &'static str, chain: String },

    #[error("Blockchair provider error: {status}")]
    Upstream { status: u16 },

    #[error("Failed to reach provider: {0}")]
    Transport(String),

    #[error("Blockchair returned an invalid response from provider")]
    InvalidResponse,

    /// Error reported inside a successful provider response (`context.error`)
    #[error("{0}")]
    Provider(String),
}

impl ProxyError {
    /// Coarse classification used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential | Self::InvalidProviderUrl(_) => "configuration",
            Self::InvalidRequestBody(_)
            | Self::MissingAction
            | Self::InvalidAction
            | Self::MissingAddress { .. }
            | Self::MissingTxHash => "input",
            Self::NotFound { .. } | Self::Upstream { .. } | Self::Transport(_) | Self::InvalidResponse => {
                "upstream"
            }
            Self::Provider(_) => "provider",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
