//! Inverse parsing: raw wire bytes back to an account-style view.
//!
//! The parser classifies a raw transaction by the shape of its first
//! output script and recovers the fields a request would have carried.
//! Account-model fields with no UTXO equivalent (nonce, chain id) take
//! fixed defaults.

use qtum_primitives::Amount;
use qtum_script::number;
use qtum_script::opcodes::{OP_4, OP_DUP};

use crate::request::{TransactionKind, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE};
use crate::transaction::Transaction;
use crate::TransactionError;

/// Chain id reported for parsed transactions.
pub const DEFAULT_CHAIN_ID: u64 = 81;

/// Nonce reported for parsed transactions. The UTXO model has no
/// nonce, so a constant stands in.
pub const DEFAULT_NONCE: u64 = 1;

/// An account-style view of a raw transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedTransaction {
    /// Display txid as `0x`-prefixed hex.
    pub hash: String,

    /// The recovered transaction kind.
    pub kind: TransactionKind,

    /// Destination address as `0x`-prefixed hex, empty for deployments.
    pub to: String,

    /// Sender address recovered from the change output, empty when the
    /// transaction carries no change.
    pub from: String,

    /// Value carried by the primary output, in satoshis.
    pub value: Amount,

    /// Gas limit recovered from the contract script, or the default.
    pub gas_limit: i64,

    /// Gas price recovered from the contract script, or the default.
    pub gas_price: i64,

    /// Bytecode or calldata recovered from the contract script.
    pub data: Vec<u8>,

    /// Account-model nonce placeholder.
    pub nonce: u64,

    /// Chain id placeholder.
    pub chain_id: u64,
}

/// Parse raw transaction bytes into an account-style view.
///
/// Classification looks at the first output script: a P2PKH pattern is
/// a transfer, an OP_4-led script with a contract address push is a
/// call, and any other OP_4-led script is a deployment. The sender is
/// recovered from the change output's key hash when one exists.
///
/// # Arguments
/// * `raw` - Complete wire-format transaction bytes.
///
/// # Returns
/// The parsed view, or an error for malformed bytes or an
/// unrecognizable primary script.
pub fn parse_transaction(raw: &[u8]) -> Result<ParsedTransaction, TransactionError> {
    let tx = Transaction::from_bytes(raw)?;
    if tx.outputs.is_empty() {
        return Err(TransactionError::InvalidTransaction(
            "transaction has no outputs".to_string(),
        ));
    }

    let hash = tx.tx_id_hex();
    let primary = &tx.outputs[0];
    let chunks = primary.script.chunks()?;
    if chunks.is_empty() {
        return Err(TransactionError::InvalidTransaction(
            "primary output script is empty".to_string(),
        ));
    }

    // Sender: key hash of the change output, when present.
    let from = tx
        .outputs
        .get(1)
        .and_then(|out| out.script.public_key_hash().ok())
        .map(|h| format!("0x{}", hex::encode(h)))
        .unwrap_or_default();

    let mut parsed = ParsedTransaction {
        hash,
        kind: TransactionKind::Transfer,
        to: String::new(),
        from,
        value: primary.value,
        gas_limit: DEFAULT_GAS_LIMIT,
        gas_price: DEFAULT_GAS_PRICE,
        data: Vec::new(),
        nonce: DEFAULT_NONCE,
        chain_id: DEFAULT_CHAIN_ID,
    };

    match chunks[0].op {
        OP_DUP => {
            if chunks.len() < 5 {
                return Err(TransactionError::InvalidTransaction(
                    "truncated P2PKH script".to_string(),
                ));
            }
            parsed.kind = TransactionKind::Transfer;
            parsed.to = format!("0x{}", hex::encode(chunks[2].data_or_empty()));
        }
        OP_4 if chunks.len() > 5 => {
            parsed.kind = TransactionKind::ContractCall;
            parsed.gas_limit = number::decode(chunks[1].data_or_empty())?;
            parsed.gas_price = number::decode(chunks[2].data_or_empty())?;
            parsed.data = chunks[3].data_or_empty().to_vec();
            parsed.to = format!("0x{}", hex::encode(chunks[4].data_or_empty()));
        }
        OP_4 => {
            if chunks.len() < 5 {
                return Err(TransactionError::InvalidTransaction(
                    "truncated contract script".to_string(),
                ));
            }
            parsed.kind = TransactionKind::ContractCreation;
            parsed.gas_limit = number::decode(chunks[1].data_or_empty())?;
            parsed.gas_price = number::decode(chunks[2].data_or_empty())?;
            parsed.data = chunks[3].data_or_empty().to_vec();
        }
        op => {
            return Err(TransactionError::InvalidTransaction(format!(
                "unrecognized primary output script starting with {:#x}",
                op
            )));
        }
    }

    Ok(parsed)
}
