//! The opcode subset used by payment and contract scripts.
//!
//! Qtum extends the Bitcoin opcode set with OP_CREATE and OP_CALL for
//! EVM contract deployment and invocation.

/// OP_0: push an empty byte array.
pub const OP_0: u8 = 0x00;

/// Direct push of 20 bytes (public key hashes, contract addresses).
pub const OP_DATA_20: u8 = 0x14;

/// Direct push of 33 bytes (compressed public keys).
pub const OP_DATA_33: u8 = 0x21;

/// OP_PUSHDATA1: next byte is the push length.
pub const OP_PUSHDATA1: u8 = 0x4c;

/// OP_PUSHDATA2: next 2 bytes (LE) are the push length.
pub const OP_PUSHDATA2: u8 = 0x4d;

/// OP_PUSHDATA4: next 4 bytes (LE) are the push length.
pub const OP_PUSHDATA4: u8 = 0x4e;

/// OP_4: push the number 4. Marks the EVM version in contract scripts.
pub const OP_4: u8 = 0x54;

/// OP_DUP: duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;

/// OP_EQUALVERIFY: compare top two items, fail if unequal.
pub const OP_EQUALVERIFY: u8 = 0x88;

/// OP_HASH160: hash the top item with SHA-256 then RIPEMD-160.
pub const OP_HASH160: u8 = 0xa9;

/// OP_CODESEPARATOR: excluded from signature hash computation.
pub const OP_CODESEPARATOR: u8 = 0xab;

/// OP_CHECKSIG: verify a signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;

/// OP_CREATE: deploy an EVM contract (Qtum extension).
pub const OP_CREATE: u8 = 0xc1;

/// OP_CALL: invoke an EVM contract (Qtum extension).
pub const OP_CALL: u8 = 0xc2;
