/// Domain-specific error types for the auction node library.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("RPC operation failed: {0}")]
    Rpc(String),

    #[error("Persistence operation failed: {0}")]
    Persistence(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias.
pub type AuctionResult<T> = Result<T, AuctionError>;

impl From<serde_json::Error> for AuctionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
