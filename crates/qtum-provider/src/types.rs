//! JSON-RPC wire types.

use serde::{Deserialize, Serialize};

use qtum_primitives::Amount;
use qtum_transaction::Utxo;

use crate::ProviderError;

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

/// A JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

/// A JSON-RPC error object.
#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// A spendable output as the adapter reports it.
///
/// Amounts arrive as decimal coin strings and convert to satoshis with
/// 7-place truncation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUtxo {
    pub txid: String,
    pub vout: u32,
    pub amount: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl RawUtxo {
    /// Convert to the selector's UTXO type.
    pub fn into_utxo(self) -> Result<Utxo, ProviderError> {
        let amount = Amount::parse_coins(&self.amount)
            .map_err(|e| ProviderError::InvalidUtxo(format!("{}: {}", self.txid, e)))?;
        Ok(Utxo {
            txid: self.txid,
            vout: self.vout,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_utxo_conversion() {
        let raw: RawUtxo = serde_json::from_str(
            r#"{"txid": "ab", "vout": 2, "amount": "4.8998448", "address": "0x99"}"#,
        )
        .unwrap();
        let utxo = raw.into_utxo().unwrap();
        assert_eq!(utxo.vout, 2);
        assert_eq!(utxo.amount, Amount::from_sats(489_984_480));
    }

    #[test]
    fn test_raw_utxo_bad_amount() {
        let raw = RawUtxo {
            txid: "ab".into(),
            vout: 0,
            amount: "not a number".into(),
            address: None,
        };
        assert!(raw.into_utxo().is_err());
    }
}
