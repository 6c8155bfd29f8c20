//! Qtum bridge SDK - node RPC client.
//!
//! A JSON-RPC 2.0 client for the adapter endpoints the bridge depends
//! on: fetching spendable UTXOs for an address and broadcasting raw
//! transactions. Implements the transaction builder's `UtxoSource`.

pub mod client;
pub mod types;

mod error;
pub use client::QtumClient;
pub use error::ProviderError;

#[cfg(test)]
mod tests;
