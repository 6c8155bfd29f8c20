//! Locking and unlocking script templates.
//!
//! Builders for the three output shapes the bridge produces (P2PKH
//! payments, contract deployment, contract calls) and the P2PKH
//! unlocking script that spends them.

use crate::number;
use crate::opcodes::*;
use crate::{Script, ScriptError};

/// Build a P2PKH locking script for a 20-byte public key hash.
///
/// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
pub fn p2pkh_lock(pubkey_hash: &[u8; 20]) -> Script {
    let mut bytes = Vec::with_capacity(25);
    bytes.push(OP_DUP);
    bytes.push(OP_HASH160);
    bytes.push(OP_DATA_20);
    bytes.extend_from_slice(pubkey_hash);
    bytes.push(OP_EQUALVERIFY);
    bytes.push(OP_CHECKSIG);
    Script::from_bytes(&bytes)
}

/// Build a P2PKH unlocking script.
///
/// Pattern: <DER signature + sighash byte> <compressed public key>
///
/// # Arguments
/// * `sig_with_hashtype` - DER-encoded signature with the sighash type
///   byte appended.
/// * `pubkey` - The 33-byte compressed public key.
pub fn p2pkh_unlock(sig_with_hashtype: &[u8], pubkey: &[u8; 33]) -> Result<Script, ScriptError> {
    let mut script = Script::new();
    script.append_push_data(sig_with_hashtype)?;
    script.append_push_data(pubkey)?;
    Ok(script)
}

/// Build a contract deployment locking script.
///
/// Pattern: OP_4 <gas limit> <gas price> <bytecode> OP_CREATE
///
/// The leading OP_4 marks EVM version 4; gas values are pushed as
/// minimal script numbers.
///
/// # Arguments
/// * `gas_limit` - Execution gas limit in gas units.
/// * `gas_price` - Gas price in satoshis per gas unit.
/// * `data` - The contract deployment bytecode.
pub fn contract_create(gas_limit: i64, gas_price: i64, data: &[u8]) -> Result<Script, ScriptError> {
    let mut script = Script::new();
    script.append_opcode(OP_4);
    script.append_push_data(&number::encode(gas_limit))?;
    script.append_push_data(&number::encode(gas_price))?;
    script.append_push_data(data)?;
    script.append_opcode(OP_CREATE);
    Ok(script)
}

/// Build a contract call locking script.
///
/// Pattern: OP_4 <gas limit> <gas price> <calldata> <contract address> OP_CALL
///
/// # Arguments
/// * `gas_limit` - Execution gas limit in gas units.
/// * `gas_price` - Gas price in satoshis per gas unit.
/// * `data` - The ABI-encoded calldata.
/// * `contract_address` - The 20-byte contract address.
pub fn contract_call(
    gas_limit: i64,
    gas_price: i64,
    data: &[u8],
    contract_address: &[u8; 20],
) -> Result<Script, ScriptError> {
    let mut script = Script::new();
    script.append_opcode(OP_4);
    script.append_push_data(&number::encode(gas_limit))?;
    script.append_push_data(&number::encode(gas_price))?;
    script.append_push_data(data)?;
    script.append_push_data(contract_address)?;
    script.append_opcode(OP_CALL);
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkh() -> [u8; 20] {
        let bytes = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        out
    }

    #[test]
    fn test_p2pkh_lock() {
        let script = p2pkh_lock(&pkh());
        assert_eq!(
            script.to_hex(),
            "76a914751e76e8199196d454941c45d1b3a323f1433bd688ac"
        );
        assert!(script.is_p2pkh());
        assert_eq!(script.public_key_hash().unwrap(), pkh());
    }

    #[test]
    fn test_p2pkh_unlock_shape() {
        // 71-byte signature + hashtype, then a 33-byte key
        let sig = vec![0x30; 71];
        let pubkey = [0x02; 33];
        let script = p2pkh_unlock(&sig, &pubkey).unwrap();
        let chunks = script.chunks().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].data.as_deref(), Some(&sig[..]));
        assert_eq!(chunks[1].data.as_deref(), Some(&pubkey[..]));
        assert_eq!(script.len(), 1 + 71 + 1 + 33);
    }

    #[test]
    fn test_contract_create_layout() {
        let data = hex::decode("60806040").unwrap();
        let script = contract_create(250_000, 40, &data).unwrap();
        let chunks = script.chunks().unwrap();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0].op, OP_4);
        assert_eq!(chunks[1].data.as_deref(), Some(&[0x90, 0xd0, 0x03][..]));
        assert_eq!(chunks[2].data.as_deref(), Some(&[0x28][..]));
        assert_eq!(chunks[3].data.as_deref(), Some(&data[..]));
        assert_eq!(chunks[4].op, OP_CREATE);
        assert!(script.is_contract());
    }

    #[test]
    fn test_contract_call_layout() {
        let data = hex::decode("a9059cbb").unwrap();
        let addr = [0x42u8; 20];
        let script = contract_call(250_000, 40, &data, &addr).unwrap();
        let chunks = script.chunks().unwrap();
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks[0].op, OP_4);
        assert_eq!(chunks[4].data.as_deref(), Some(&addr[..]));
        assert_eq!(chunks[5].op, OP_CALL);
        assert!(script.is_contract());
    }

    #[test]
    fn test_large_bytecode_uses_pushdata(){
        let data = vec![0x60; 600];
        let script = contract_create(250_000, 40, &data).unwrap();
        let chunks = script.chunks().unwrap();
        assert_eq!(chunks[3].data.as_deref(), Some(&data[..]));
    }
}
