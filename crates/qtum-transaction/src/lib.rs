//! Qtum bridge SDK - transaction construction, signing, and parsing.
//!
//! Translates account-style requests (to / value / gas / data) into
//! signed UTXO transactions:
//! - Request classification into transfer, contract call, or deployment
//! - UTXO selection and size-based fee estimation
//! - Signature hash computation and per-input P2PKH signing
//! - Wire serialization and the inverse raw-transaction parser

pub mod builder;
pub mod fees;
pub mod input;
pub mod output;
pub mod parser;
pub mod request;
pub mod selector;
pub mod sighash;
pub mod signer;
pub mod transaction;

mod error;
pub use builder::{build_signed_transaction, UtxoSource, UtxoSourceError};
pub use error::TransactionError;
pub use input::TxInput;
pub use output::TxOutput;
pub use parser::ParsedTransaction;
pub use request::{TransactionKind, TransactionRequest};
pub use selector::Utxo;
pub use transaction::Transaction;
