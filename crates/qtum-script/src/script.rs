//! Script type - a sequence of opcodes and data pushes.
//!
//! Scripts appear in transaction outputs (locking) and inputs
//! (unlocking) to define spending conditions. The Script wraps a
//! `Vec<u8>` and provides construction, classification, and
//! serialization methods.

use std::fmt;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is
    /// invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a data push with the correct push prefix for its length.
    ///
    /// # Arguments
    /// * `data` - The bytes to push.
    ///
    /// # Returns
    /// `Ok(())`, or `DataTooBig` if the payload exceeds protocol limits.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append a single opcode byte.
    pub fn append_opcode(&mut self, op: u8) {
        self.0.push(op);
    }

    /// Parse the script into its chunk sequence.
    ///
    /// # Returns
    /// The parsed chunks, or an error if a push is truncated.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    /// Check if this is a Pay-to-Public-Key-Hash (P2PKH) locking script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Check if this is a contract script (OP_CREATE or OP_CALL terminated).
    pub fn is_contract(&self) -> bool {
        matches!(self.0.last(), Some(&OP_CREATE) | Some(&OP_CALL))
    }

    /// Extract the 20-byte public key hash from a P2PKH locking script.
    ///
    /// # Returns
    /// The hash, or `NotP2PKH` if the script doesn't match the pattern.
    pub fn public_key_hash(&self) -> Result<[u8; 20], ScriptError> {
        if !self.is_p2pkh() {
            return Err(ScriptError::NotP2PKH);
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.0[3..23]);
        Ok(out)
    }

    /// Return a copy with every OP_CODESEPARATOR byte removed.
    ///
    /// The filter operates on raw bytes, so 0xab bytes inside push
    /// payloads are removed as well. Signature hashing applies this to
    /// the subscript placed in the input being signed.
    pub fn strip_code_separators(&self) -> Script {
        Script(
            self.0
                .iter()
                .copied()
                .filter(|&b| b != OP_CODESEPARATOR)
                .collect(),
        )
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
