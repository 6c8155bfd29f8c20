//! Core transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs, and
//! locktime, with binary and hex serialization and txid computation.

use qtum_primitives::hash::{hash160, sha256d};
use qtum_primitives::util::{reverse_txid, TxReader, TxWriter, VarInt};

use crate::input::TxInput;
use crate::output::TxOutput;
use crate::TransactionError;

/// Transaction format version used for all produced transactions.
pub const TRANSACTION_VERSION: u32 = 2;

/// A transaction consisting of a version, inputs, outputs, and a lock time.
///
/// # Wire format
///
/// | Field        | Size                 |
/// |--------------|----------------------|
/// | version      | 4 bytes (LE)         |
/// | input count  | VarInt               |
/// | inputs       | variable (per input) |
/// | output count | VarInt               |
/// | outputs      | variable (per output)|
/// | lock_time    | 4 bytes (LE)         |
#[derive(Clone, Debug)]
pub struct Transaction {
    /// Transaction format version.
    pub version: u32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TxInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TxOutput>,

    /// Lock time. Zero means the transaction is immediately valid.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty version-2 transaction with lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: TRANSACTION_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    /// Parse a transaction from a hex-encoded string.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the hex
    /// is invalid or the bytes do not form a valid transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The byte slice must contain exactly one complete transaction with
    /// no trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = TxReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `TxReader`.
    pub fn read_from(reader: &mut TxReader) -> Result<Self, TransactionError> {
        let version = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;

        // Counts come off the wire unchecked, so cap the preallocation
        // by what the remaining bytes could possibly hold (41 bytes per
        // input, 9 per output at minimum); an overstated count then
        // fails with EOF instead of aborting on allocation.
        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        let capacity = (input_count.value() as usize).min(reader.remaining() / 41);
        let mut inputs = Vec::with_capacity(capacity);
        for _ in 0..input_count.value() {
            inputs.push(TxInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        let capacity = (output_count.value() as usize).min(reader.remaining() / 9);
        let mut outputs = Vec::with_capacity(capacity);
        for _ in 0..output_count.value() {
            outputs.push(TxOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Serialize this transaction to raw wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = TxWriter::with_capacity(256);
        writer.write_u32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    /// Serialize this transaction to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Compute the transaction ID (double SHA-256 of serialized bytes).
    ///
    /// The returned bytes are in internal (little-endian) order; use
    /// [`Transaction::tx_id_hex`] for the conventional display string.
    pub fn tx_id(&self) -> [u8; 32] {
        sha256d(&self.to_bytes())
    }

    /// Compute the transaction ID as a `0x`-prefixed display hex string.
    ///
    /// The hash bytes are reversed before encoding, following the
    /// convention of displaying txids in big-endian order.
    pub fn tx_id_hex(&self) -> String {
        format!("0x{}", hex::encode(reverse_txid(&self.tx_id())))
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the address a deployed contract will live at.
///
/// The contract address is Hash160 over the deploying outpoint: the
/// txid in internal (little-endian) order followed by the output index
/// as a little-endian u32.
///
/// # Arguments
/// * `txid` - The deploying transaction's id in display (big-endian) order.
/// * `vout` - The index of the OP_CREATE output.
///
/// # Returns
/// The 20-byte contract address.
pub fn contract_address(txid: &[u8; 32], vout: u32) -> [u8; 20] {
    let mut preimage = Vec::with_capacity(36);
    preimage.extend_from_slice(&reverse_txid(txid));
    preimage.extend_from_slice(&vout.to_le_bytes());
    hash160(&preimage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtum_primitives::Amount;
    use qtum_script::Script;

    fn p2pkh() -> Script {
        Script::from_hex("76a914751e76e8199196d454941c45d1b3a323f1433bd688ac").unwrap()
    }

    #[test]
    fn test_empty_tx_serialization() {
        let tx = Transaction::new();
        // version(4) + in count(1) + out count(1) + locktime(4)
        assert_eq!(tx.to_hex(), "02000000000000000000");
    }

    #[test]
    fn test_roundtrip() {
        let mut tx = Transaction::new();
        tx.inputs.push(TxInput::new([0x11; 32], 1, p2pkh()));
        tx.outputs
            .push(TxOutput::new(Amount::from_sats(10_000_000), p2pkh()));

        let bytes = tx.to_bytes();
        let parsed = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.version, TRANSACTION_VERSION);
        assert_eq!(parsed.inputs.len(), 1);
        assert_eq!(parsed.outputs.len(), 1);
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_overstated_input_count_rejected() {
        // input count claims u64::MAX with no input bytes behind it
        let mut bytes = vec![0x02, 0x00, 0x00, 0x00];
        bytes.push(0xff);
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(
            Transaction::from_bytes(&bytes),
            Err(TransactionError::SerializationError(_))
        ));
    }

    #[test]
    fn test_huge_script_length_rejected() {
        // one input whose script-length varint claims u64::MAX bytes
        let mut bytes = vec![0x02, 0x00, 0x00, 0x00];
        bytes.push(0x01);
        bytes.extend_from_slice(&[0x11; 32]);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.push(0xff);
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(
            Transaction::from_bytes(&bytes),
            Err(TransactionError::SerializationError(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = Transaction::new().to_bytes();
        bytes.push(0x00);
        assert!(Transaction::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_tx_id_is_reversed_sha256d() {
        let tx = Transaction::new();
        let internal = sha256d(&tx.to_bytes());
        let display = tx.tx_id_hex();
        assert!(display.starts_with("0x"));
        let decoded = hex::decode(&display[2..]).unwrap();
        let mut reversed = decoded.clone();
        reversed.reverse();
        assert_eq!(&reversed[..], &internal[..]);
    }

    #[test]
    fn test_contract_address_depends_on_outpoint() {
        let txid = [0x5a; 32];
        let a = contract_address(&txid, 0);
        let b = contract_address(&txid, 1);
        assert_ne!(a, b);

        // matches a hand-computed hash160 of reversed txid || vout
        let mut preimage = Vec::new();
        preimage.extend_from_slice(&[0x5a; 32]); // palindrome under reversal
        preimage.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(a, hash160(&preimage));
    }
}
