//! JSON-RPC client for the node adapter.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use tracing::debug;

use qtum_primitives::Amount;
use qtum_transaction::{Transaction, Utxo, UtxoSource, UtxoSourceError};

use crate::error::ProviderError;
use crate::types::{RawUtxo, RpcRequest, RpcResponse};

/// JSON-RPC client for fetching UTXOs and broadcasting transactions.
#[derive(Debug)]
pub struct QtumClient {
    /// Base URL of the adapter endpoint.
    base_url: String,
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// Monotonic request id counter.
    next_id: AtomicU64,
}

impl QtumClient {
    /// Create a new client for the given endpoint URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        QtumClient {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Issue a JSON-RPC call and unwrap its result.
    async fn rpc<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ProviderError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response: RpcResponse<T> = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        response.result.ok_or(ProviderError::MissingResult)
    }

    /// Fetch spendable UTXOs for an address able to cover `target`.
    ///
    /// # Arguments
    /// * `address` - The spender's `0x`-prefixed hex address.
    /// * `target` - The balance to cover, passed to the adapter as a
    ///   decimal coin string.
    pub async fn get_utxos(
        &self,
        address: &str,
        target: Amount,
    ) -> Result<Vec<Utxo>, ProviderError> {
        let raw: Vec<RawUtxo> = self
            .rpc(
                "qtum_getUTXOs",
                serde_json::json!([address, target.to_string()]),
            )
            .await?;
        debug!(address, count = raw.len(), "fetched utxos");
        raw.into_iter().map(RawUtxo::into_utxo).collect()
    }

    /// Broadcast a signed transaction.
    ///
    /// # Returns
    /// The transaction hash reported by the node.
    pub async fn send_raw_transaction(&self, tx: &Transaction) -> Result<String, ProviderError> {
        let raw_hex = format!("0x{}", tx.to_hex());
        let hash: String = self
            .rpc("eth_sendRawTransaction", serde_json::json!([raw_hex]))
            .await?;
        debug!(%hash, "broadcast transaction");
        Ok(hash)
    }
}

impl UtxoSource for QtumClient {
    async fn fetch_utxos(
        &self,
        address: &str,
        target: Amount,
    ) -> Result<Vec<Utxo>, UtxoSourceError> {
        self.get_utxos(address, target).await.map_err(|e| {
            if e.is_insufficient_funds() {
                UtxoSourceError::InsufficientFunds(e.to_string())
            } else {
                UtxoSourceError::Source(e.to_string())
            }
        })
    }
}
