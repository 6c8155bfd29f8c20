/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// A contract deployment request carried a non-zero value.
    #[error("value must be zero when deploying a contract")]
    InvalidDeployWithValue,

    /// The available balance cannot cover the required amount plus fees.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The sighash type byte is outside the supported range.
    #[error("invalid sighash type: {0:#x}")]
    InvalidSighashType(u8),

    /// The transaction structure is invalid (e.g. missing inputs or outputs).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// An error occurred during input signing.
    #[error("signing error: {0}")]
    SigningError(String),

    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An underlying script error (forwarded from `qtum-script`).
    #[error("malformed script: {0}")]
    MalformedScript(#[from] qtum_script::ScriptError),

    /// An underlying primitives error (forwarded from `qtum-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] qtum_primitives::PrimitivesError),
}
