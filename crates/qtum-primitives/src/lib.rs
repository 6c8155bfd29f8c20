//! Qtum bridge SDK - cryptographic primitives, amounts, and utilities.
//!
//! This crate provides the foundational building blocks for the bridge:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Fixed-point coin amounts with 7-decimal-place truncation
//! - Elliptic curve cryptography (secp256k1 keys, DER signatures)
//! - Compact-size integer encoding and binary reader/writer

pub mod amount;
pub mod ec;
pub mod hash;
pub mod util;

mod error;
pub use amount::Amount;
pub use error::PrimitivesError;
