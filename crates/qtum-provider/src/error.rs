//! Error types for RPC operations.

/// Errors that can occur when talking to the node adapter.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// The JSON-RPC error code.
        code: i64,
        /// Human-readable error message.
        message: String,
    },

    /// The response was structurally valid JSON-RPC but carried no
    /// result.
    #[error("missing result in rpc response")]
    MissingResult,

    /// A UTXO in the response could not be interpreted.
    #[error("invalid utxo in response: {0}")]
    InvalidUtxo(String),
}

impl ProviderError {
    /// True if the server signalled that the account balance cannot
    /// cover the requested amount.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, ProviderError::Rpc { message, .. }
            if message.to_ascii_lowercase().contains("insufficient funds"))
    }
}
