#![deny(missing_docs)]

//! Qtum bridge SDK - Complete SDK.
//!
//! Re-exports all bridge components for convenient single-crate usage.

pub use qtum_primitives as primitives;
pub use qtum_provider as provider;
pub use qtum_script as script;
pub use qtum_transaction as transaction;
