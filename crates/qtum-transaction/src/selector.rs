//! UTXO selection.
//!
//! First-fit selection: spendable outputs are taken in the order the
//! source returned them until the accumulated balance reaches the
//! target. Selection is deterministic so the same inputs produce the
//! same transaction.

use serde::{Deserialize, Serialize};

use qtum_primitives::Amount;
use qtum_script::Script;

use crate::input::TxInput;
use crate::TransactionError;

/// A spendable output as reported by a UTXO source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Utxo {
    /// Txid of the funding transaction in display (big-endian) hex.
    pub txid: String,

    /// Output index within the funding transaction.
    pub vout: u32,

    /// Value of the output in satoshis.
    pub amount: Amount,
}

/// The result of a selection pass.
#[derive(Clone, Debug)]
pub struct Selection {
    /// Inputs spending the selected outputs, in selection order.
    pub inputs: Vec<TxInput>,

    /// Total selected balance at 7-place precision.
    pub total: Amount,
}

impl Selection {
    /// True if the selected balance covers the target.
    pub fn covers(&self, target: Amount) -> bool {
        self.total >= target
    }
}

/// Select UTXOs first-fit until the accumulated balance reaches `target`.
///
/// Every selected output becomes an unsigned input carrying the
/// spender's locking script as its signing placeholder. Each UTXO's
/// amount is truncated to 7-place precision before accumulating. If
/// the target is never reached, all UTXOs are returned and the caller
/// decides whether the shortfall is fatal.
///
/// # Arguments
/// * `utxos` - Candidate outputs in source order.
/// * `target` - The balance to gather.
/// * `spender_script` - The P2PKH locking script all candidates are
///   assumed to be locked by.
///
/// # Returns
/// The selection, or a serialization error if a txid is malformed.
pub fn select_inputs(
    utxos: &[Utxo],
    target: Amount,
    spender_script: &Script,
) -> Result<Selection, TransactionError> {
    let mut inputs = Vec::new();
    let mut total = Amount::ZERO;

    for utxo in utxos {
        inputs.push(utxo.to_input(spender_script)?);
        total = total.checked_add(utxo.amount.trunc7())?;
        if total >= target {
            break;
        }
    }

    Ok(Selection { inputs, total })
}

impl Utxo {
    /// Build an unsigned input spending this UTXO.
    ///
    /// The display-order txid is decoded and reversed into internal
    /// order for the wire.
    pub fn to_input(&self, spender_script: &Script) -> Result<TxInput, TransactionError> {
        let bytes = hex::decode(self.txid.strip_prefix("0x").unwrap_or(&self.txid))
            .map_err(|e| TransactionError::SerializationError(format!("invalid txid: {}", e)))?;
        if bytes.len() != 32 {
            return Err(TransactionError::SerializationError(format!(
                "txid must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut prev_txid = [0u8; 32];
        for (i, b) in bytes.iter().rev().enumerate() {
            prev_txid[i] = *b;
        }
        Ok(TxInput::new(prev_txid, self.vout, spender_script.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DEFAULT_SEQUENCE_NUMBER;

    fn spender() -> Script {
        Script::from_hex("76a914751e76e8199196d454941c45d1b3a323f1433bd688ac").unwrap()
    }

    fn utxo(txid_byte: u8, coins: i64) -> Utxo {
        Utxo {
            txid: hex::encode([txid_byte; 32]),
            vout: 0,
            amount: Amount::from_coins(coins),
        }
    }

    #[test]
    fn test_first_fit_stops_at_target() {
        let utxos = vec![utxo(0x01, 5), utxo(0x02, 3), utxo(0x03, 7)];
        let sel = select_inputs(&utxos, Amount::from_coins(6), &spender()).unwrap();
        assert_eq!(sel.inputs.len(), 2);
        assert_eq!(sel.total, Amount::from_coins(8));
        assert!(sel.covers(Amount::from_coins(6)));
    }

    #[test]
    fn test_single_utxo_sufficient() {
        let utxos = vec![utxo(0x01, 5), utxo(0x02, 3)];
        let sel = select_inputs(&utxos, Amount::from_sats(10_000_000), &spender()).unwrap();
        assert_eq!(sel.inputs.len(), 1);
        assert_eq!(sel.total, Amount::from_coins(5));
    }

    #[test]
    fn test_shortfall_returns_everything() {
        let utxos = vec![utxo(0x01, 1), utxo(0x02, 2)];
        let sel = select_inputs(&utxos, Amount::from_coins(10), &spender()).unwrap();
        assert_eq!(sel.inputs.len(), 2);
        assert_eq!(sel.total, Amount::from_coins(3));
        assert!(!sel.covers(Amount::from_coins(10)));
    }

    #[test]
    fn test_inputs_carry_placeholder_and_reversed_txid() {
        let utxos = vec![Utxo {
            txid: "0100000000000000000000000000000000000000000000000000000000000000".into(),
            vout: 7,
            amount: Amount::from_coins(1),
        }];
        let sel = select_inputs(&utxos, Amount::ZERO, &spender()).unwrap();
        let input = &sel.inputs[0];
        // display order reversed into internal order
        assert_eq!(input.prev_txid[31], 0x01);
        assert_eq!(input.prev_vout, 7);
        assert_eq!(input.script, spender());
        assert!(input.unlocking_script.is_none());
        assert_eq!(input.sequence, DEFAULT_SEQUENCE_NUMBER);
    }

    #[test]
    fn test_amounts_truncated_before_accumulating() {
        let utxos = vec![Utxo {
            txid: hex::encode([0x01; 32]),
            vout: 0,
            // 9 satoshis truncate to 0 at 7-place precision
            amount: Amount::from_sats(9),
        }];
        let sel = select_inputs(&utxos, Amount::from_sats(5), &spender()).unwrap();
        assert_eq!(sel.total, Amount::ZERO);
    }

    #[test]
    fn test_malformed_txid_rejected() {
        let utxos = vec![Utxo {
            txid: "abcd".into(),
            vout: 0,
            amount: Amount::from_coins(1),
        }];
        assert!(select_inputs(&utxos, Amount::from_coins(1), &spender()).is_err());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let utxos = vec![utxo(0x01, 2), utxo(0x02, 2), utxo(0x03, 2)];
        let a = select_inputs(&utxos, Amount::from_coins(3), &spender()).unwrap();
        let b = select_inputs(&utxos, Amount::from_coins(3), &spender()).unwrap();
        assert_eq!(a.inputs, b.inputs);
    }
}
