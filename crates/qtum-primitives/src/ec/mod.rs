//! Elliptic curve cryptography over secp256k1.
//!
//! Private/public key wrappers around k256 plus ECDSA signatures with
//! DER serialization and low-S normalization.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
