//! Transaction output type.

use qtum_primitives::util::{TxReader, TxWriter, VarInt};
use qtum_primitives::Amount;
use qtum_script::Script;

use crate::TransactionError;

/// A transaction output: a value locked by a script.
///
/// # Wire format
///
/// | Field          | Size          |
/// |----------------|---------------|
/// | value          | 8 bytes (LE)  |
/// | script length  | VarInt        |
/// | script         | variable      |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutput {
    /// Output value in satoshis.
    pub value: Amount,

    /// The locking script.
    pub script: Script,
}

impl TxOutput {
    /// Create an output locking `value` with the given script.
    pub fn new(value: Amount, script: Script) -> Self {
        TxOutput { value, script }
    }

    /// Deserialize an output from a `TxReader`.
    pub fn read_from(reader: &mut TxReader) -> Result<Self, TransactionError> {
        let value = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output value: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;
        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading output script: {}", e))
        })?;

        Ok(TxOutput {
            value: Amount::from_sats(value as i64),
            script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this output into a `TxWriter`.
    pub fn write_to(&self, writer: &mut TxWriter) {
        writer.write_u64_le(self.value.sats() as u64);
        writer.write_varint(VarInt::from(self.script.len()));
        writer.write_bytes(self.script.as_bytes());
    }
}
