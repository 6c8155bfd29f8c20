//! Transaction input type.

use qtum_primitives::util::{TxReader, TxWriter, VarInt};
use qtum_script::Script;

use crate::TransactionError;

/// Sequence number marking an input as final.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xffff_ffff;

/// A transaction input spending a previous output.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | prev txid        | 32 bytes (LE)  |
/// | prev vout        | 4 bytes (LE)   |
/// | script length    | VarInt         |
/// | script           | variable       |
/// | sequence         | 4 bytes (LE)   |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxInput {
    /// Txid of the output being spent, in internal (little-endian) order.
    pub prev_txid: [u8; 32],

    /// Index of the output being spent within its transaction.
    pub prev_vout: u32,

    /// The locking script of the spent output. Serves as the signing
    /// placeholder while `unlocking_script` is unset.
    pub script: Script,

    /// The unlocking script, set once the input is signed.
    pub unlocking_script: Option<Script>,

    /// Sequence number.
    pub sequence: u32,
}

impl TxInput {
    /// Create an unsigned input spending the given outpoint.
    ///
    /// # Arguments
    /// * `prev_txid` - Txid of the spent output in internal order.
    /// * `prev_vout` - Output index within that transaction.
    /// * `script` - The spent output's locking script.
    pub fn new(prev_txid: [u8; 32], prev_vout: u32, script: Script) -> Self {
        TxInput {
            prev_txid,
            prev_vout,
            script,
            unlocking_script: None,
            sequence: DEFAULT_SEQUENCE_NUMBER,
        }
    }

    /// The script that serializes for this input: the unlocking script
    /// once signed, otherwise the locking-script placeholder.
    pub fn effective_script(&self) -> &Script {
        self.unlocking_script.as_ref().unwrap_or(&self.script)
    }

    /// Deserialize an input from a `TxReader`.
    pub fn read_from(reader: &mut TxReader) -> Result<Self, TransactionError> {
        let mut prev_txid = [0u8; 32];
        prev_txid.copy_from_slice(reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading prev txid: {}", e))
        })?);

        let prev_vout = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading prev vout: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;
        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading input script: {}", e))
        })?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence: {}", e))
        })?;

        // A parsed input's script is whatever was on the wire; for a
        // signed transaction that is the unlocking script.
        Ok(TxInput {
            prev_txid,
            prev_vout,
            script: Script::from_bytes(script_bytes),
            unlocking_script: None,
            sequence,
        })
    }

    /// Serialize this input into a `TxWriter`.
    pub fn write_to(&self, writer: &mut TxWriter) {
        let script = self.effective_script();
        writer.write_bytes(&self.prev_txid);
        writer.write_u32_le(self.prev_vout);
        writer.write_varint(VarInt::from(script.len()));
        writer.write_bytes(script.as_bytes());
        writer.write_u32_le(self.sequence);
    }
}
