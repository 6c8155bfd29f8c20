//! Signature hash computation.
//!
//! The preimage for an input's signature commits to the whole
//! transaction with every input script blanked except the one being
//! signed, which carries the spent output's locking script with
//! OP_CODESEPARATOR bytes removed. The 4-byte sighash type is appended
//! before double SHA-256.

use qtum_primitives::ec::Signature;
use qtum_primitives::hash::sha256d;
use qtum_primitives::util::{TxWriter, VarInt};
use qtum_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

/// Sign all outputs. The only hash type produced by the signer.
pub const SIGHASH_ALL: u8 = 0x01;

/// Sign no outputs.
pub const SIGHASH_NONE: u8 = 0x02;

/// Sign only the output at the same index as the input.
pub const SIGHASH_SINGLE: u8 = 0x03;

/// Modifier flag: commit only to the input being signed.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Compute the signature hash preimage for one input.
///
/// The transaction is not modified: the preimage is serialized directly
/// with input `input_index` carrying its placeholder script stripped of
/// OP_CODESEPARATOR bytes and every other input carrying a zero-length
/// script. The 4-byte little-endian `hash_type` is appended.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input the signature covers.
/// * `hash_type` - The sighash type byte.
///
/// # Returns
/// The preimage bytes, or an error if the index is out of range or the
/// hash type is unsupported.
pub fn sighash_preimage(
    tx: &Transaction,
    input_index: usize,
    hash_type: u8,
) -> Result<Vec<u8>, TransactionError> {
    validate_hash_type(hash_type)?;
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::SigningError(format!(
            "input index {} out of range ({} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }

    let empty = Script::new();
    let signing_script = tx.inputs[input_index].script.strip_code_separators();

    let mut writer = TxWriter::with_capacity(256);
    writer.write_u32_le(tx.version);

    writer.write_varint(VarInt::from(tx.inputs.len()));
    for (i, input) in tx.inputs.iter().enumerate() {
        let script = if i == input_index { &signing_script } else { &empty };
        writer.write_bytes(&input.prev_txid);
        writer.write_u32_le(input.prev_vout);
        writer.write_varint(VarInt::from(script.len()));
        writer.write_bytes(script.as_bytes());
        writer.write_u32_le(input.sequence);
    }

    writer.write_varint(VarInt::from(tx.outputs.len()));
    for output in &tx.outputs {
        output.write_to(&mut writer);
    }

    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(hash_type as u32);
    Ok(writer.into_bytes())
}

/// Compute the 32-byte signature digest for one input.
///
/// Double SHA-256 of [`sighash_preimage`].
pub fn sighash_digest(
    tx: &Transaction,
    input_index: usize,
    hash_type: u8,
) -> Result<[u8; 32], TransactionError> {
    Ok(sha256d(&sighash_preimage(tx, input_index, hash_type)?))
}

/// Append the sighash type byte to a DER-encoded signature.
///
/// # Arguments
/// * `sig` - The ECDSA signature.
/// * `hash_type` - The sighash type byte to append.
///
/// # Returns
/// DER bytes followed by the type byte, or `InvalidSighashType` if the
/// base type (ignoring the ANYONECANPAY flag) is not ALL, NONE, or SINGLE.
pub fn encode_signature(sig: &Signature, hash_type: u8) -> Result<Vec<u8>, TransactionError> {
    validate_hash_type(hash_type)?;
    let mut out = sig.to_der();
    out.push(hash_type);
    Ok(out)
}

fn validate_hash_type(hash_type: u8) -> Result<(), TransactionError> {
    let base = hash_type & !SIGHASH_ANYONECANPAY;
    if !(SIGHASH_ALL..=SIGHASH_SINGLE).contains(&base) {
        return Err(TransactionError::InvalidSighashType(hash_type));
    }
    Ok(())
}
