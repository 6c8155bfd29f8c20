//! Per-input transaction signing.
//!
//! Signing replaces an input's placeholder script with a P2PKH
//! unlocking script built from the digest signature and the signer's
//! compressed public key.

use qtum_primitives::ec::{PrivateKey, PublicKey, Signature};
use qtum_script::template;

use crate::sighash::{encode_signature, sighash_digest, SIGHASH_ALL};
use crate::transaction::Transaction;
use crate::TransactionError;

/// A producer of ECDSA signatures over 32-byte digests.
///
/// The seam lets key custody live outside the builder: a local private
/// key implements this directly, a remote signer can too.
pub trait DigestSigner {
    /// The public key that corresponds to produced signatures.
    fn public_key(&self) -> PublicKey;

    /// Sign a 32-byte digest.
    fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, TransactionError>;
}

impl DigestSigner for PrivateKey {
    fn public_key(&self) -> PublicKey {
        self.pub_key()
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, TransactionError> {
        self.sign(digest)
            .map_err(|e| TransactionError::SigningError(e.to_string()))
    }
}

/// Sign one input and install its unlocking script.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input to sign.
/// * `signer` - The digest signer holding the spending key.
/// * `hash_type` - The sighash type to commit to and append.
///
/// # Returns
/// `Ok(())` once the unlocking script is set, or an error if the index
/// is out of range, the hash type is unsupported, or signing fails.
pub fn sign_input<S: DigestSigner>(
    tx: &mut Transaction,
    input_index: usize,
    signer: &S,
    hash_type: u8,
) -> Result<(), TransactionError> {
    let digest = sighash_digest(tx, input_index, hash_type)?;
    let sig = signer.sign_digest(&digest)?;
    let sig_bytes = encode_signature(&sig, hash_type)?;
    let unlock = template::p2pkh_unlock(&sig_bytes, &signer.public_key().to_compressed())?;
    tx.inputs[input_index].unlocking_script = Some(unlock);
    Ok(())
}

/// Sign every input with SIGHASH_ALL.
pub fn sign_all<S: DigestSigner>(tx: &mut Transaction, signer: &S) -> Result<(), TransactionError> {
    for index in 0..tx.inputs.len() {
        sign_input(tx, index, signer, SIGHASH_ALL)?;
    }
    Ok(())
}
