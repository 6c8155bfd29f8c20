/// Unified error type for all primitives operations.
///
/// Covers errors from hashing, EC operations, amount parsing, and
/// binary decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount overflow in {0}")]
    AmountOverflow(&'static str),

    #[error("unexpected end of data")]
    UnexpectedEof,
}
