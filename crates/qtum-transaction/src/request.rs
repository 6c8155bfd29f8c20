//! Account-style transaction requests and their classification.
//!
//! A request looks like an account-model transaction (to / value / gas
//! limit / gas price / data). Classification decides which UTXO shape
//! it maps to and how much balance must be gathered before fees.

use serde::{Deserialize, Serialize};

use qtum_primitives::Amount;

use crate::TransactionError;

/// Default gas limit applied when a request leaves it unset.
pub const DEFAULT_GAS_LIMIT: i64 = 250_000;

/// Default gas price in satoshis per gas unit.
pub const DEFAULT_GAS_PRICE: i64 = 40;

/// An account-style transaction request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Destination address as `0x`-prefixed hex, absent for deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Value to transfer, in satoshis.
    #[serde(default)]
    pub value: Amount,

    /// Execution gas limit in gas units.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: i64,

    /// Gas price in satoshis per gas unit.
    #[serde(default = "default_gas_price")]
    pub gas_price: i64,

    /// Contract bytecode or ABI-encoded calldata, hex-encoded.
    #[serde(default, with = "hex_bytes")]
    pub data: Vec<u8>,
}

fn default_gas_limit() -> i64 {
    DEFAULT_GAS_LIMIT
}

fn default_gas_price() -> i64 {
    DEFAULT_GAS_PRICE
}

impl Default for TransactionRequest {
    fn default() -> Self {
        TransactionRequest {
            to: None,
            value: Amount::ZERO,
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_price: DEFAULT_GAS_PRICE,
            data: Vec::new(),
        }
    }
}

/// The UTXO shape a request maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    /// Plain value transfer to a P2PKH output.
    Transfer,
    /// Contract invocation via an OP_CALL output.
    ContractCall,
    /// Contract deployment via an OP_CREATE output.
    ContractCreation,
}

impl TransactionRequest {
    /// The destination address, treating an empty string as absent.
    fn destination(&self) -> Option<&str> {
        match self.to.as_deref() {
            Some("") | None => None,
            Some(addr) => Some(addr),
        }
    }

    /// True if the request carries bytecode or calldata.
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    /// The maximum gas cost of this request: gas price times gas limit,
    /// truncated to 7-place precision at each step.
    pub fn gas_budget(&self) -> Result<Amount, TransactionError> {
        Ok(Amount::from_sats(self.gas_price)
            .trunc7()
            .checked_mul(self.gas_limit)?
            .trunc7())
    }

    /// Classify this request and compute the balance it must gather
    /// before fees.
    ///
    /// - no destination, data, zero value: deployment; needed is the
    ///   gas budget. A non-zero value here is rejected outright since
    ///   deployed contracts cannot receive an endowment this way.
    /// - destination and data: contract call; needed is gas plus value.
    /// - anything else: transfer; needed is the value.
    ///
    /// Values enter the target at 7-place precision, like every other
    /// funding figure.
    ///
    /// # Returns
    /// The kind and the pre-fee target amount, or
    /// `InvalidDeployWithValue` for a deployment carrying value.
    pub fn classify(&self) -> Result<(TransactionKind, Amount), TransactionError> {
        match (self.destination(), self.has_data()) {
            (None, true) => {
                if self.value > Amount::ZERO {
                    return Err(TransactionError::InvalidDeployWithValue);
                }
                Ok((TransactionKind::ContractCreation, self.gas_budget()?))
            }
            (Some(_), true) => {
                let needed = self.gas_budget()?.checked_add(self.value.trunc7())?;
                Ok((TransactionKind::ContractCall, needed))
            }
            _ => Ok((TransactionKind::Transfer, self.value.trunc7())),
        }
    }
}

/// Parse a `0x`-prefixed hex address into its 20 raw bytes.
///
/// # Returns
/// The address bytes, or `InvalidTransaction` if the hex is malformed
/// or not 20 bytes long.
pub fn parse_address(addr: &str) -> Result<[u8; 20], TransactionError> {
    let stripped = addr.strip_prefix("0x").unwrap_or(addr);
    let bytes = hex::decode(stripped)
        .map_err(|e| TransactionError::InvalidTransaction(format!("invalid address hex: {}", e)))?;
    if bytes.len() != 20 {
        return Err(TransactionError::InvalidTransaction(format!(
            "address must be 20 bytes, got {}",
            bytes.len()
        )));
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Serde adapter for byte fields carried as hex strings (with or
/// without a `0x` prefix).
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(stripped).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_deployment() {
        let req = TransactionRequest {
            data: hex::decode("60806040").unwrap(),
            ..Default::default()
        };
        let (kind, needed) = req.classify().unwrap();
        assert_eq!(kind, TransactionKind::ContractCreation);
        // 40 sats/gas * 250_000 gas = 10_000_000 sats = 0.1 coins
        assert_eq!(needed, Amount::from_sats(10_000_000));
        assert_eq!(needed.to_string(), "0.1000000");
    }

    #[test]
    fn test_classify_deployment_with_value_rejected() {
        let req = TransactionRequest {
            value: Amount::from_sats(1),
            data: vec![0x60],
            ..Default::default()
        };
        assert!(matches!(
            req.classify(),
            Err(TransactionError::InvalidDeployWithValue)
        ));
    }

    #[test]
    fn test_classify_contract_call() {
        let req = TransactionRequest {
            to: Some("0x1122334455667788990011223344556677889900".into()),
            value: Amount::from_sats(5_000_000),
            data: hex::decode("a9059cbb").unwrap(),
            ..Default::default()
        };
        let (kind, needed) = req.classify().unwrap();
        assert_eq!(kind, TransactionKind::ContractCall);
        assert_eq!(needed, Amount::from_sats(15_000_000));
    }

    #[test]
    fn test_classify_transfer() {
        let req = TransactionRequest {
            to: Some("0x1122334455667788990011223344556677889900".into()),
            value: Amount::from_sats(250_000_000),
            ..Default::default()
        };
        let (kind, needed) = req.classify().unwrap();
        assert_eq!(kind, TransactionKind::Transfer);
        assert_eq!(needed, Amount::from_sats(250_000_000));
    }

    #[test]
    fn test_empty_to_means_deployment() {
        let req = TransactionRequest {
            to: Some(String::new()),
            data: vec![0x60],
            ..Default::default()
        };
        let (kind, _) = req.classify().unwrap();
        assert_eq!(kind, TransactionKind::ContractCreation);
    }

    #[test]
    fn test_classify_truncates_value() {
        // 9 sats vanish at 7-place precision
        let req = TransactionRequest {
            to: Some("0x1122334455667788990011223344556677889900".into()),
            value: Amount::from_sats(9),
            ..Default::default()
        };
        let (_, needed) = req.classify().unwrap();
        assert_eq!(needed, Amount::ZERO);

        let req = TransactionRequest {
            to: Some("0x1122334455667788990011223344556677889900".into()),
            value: Amount::from_sats(15),
            data: vec![0xa9],
            ..Default::default()
        };
        let (_, needed) = req.classify().unwrap();
        assert_eq!(needed, Amount::from_sats(10_000_010));
    }

    #[test]
    fn test_gas_budget_truncation() {
        // a gas price with a nonzero final satoshi digit is truncated
        // before multiplying
        let req = TransactionRequest {
            gas_price: 41,
            gas_limit: 3,
            data: vec![0x60],
            ..Default::default()
        };
        assert_eq!(req.gas_budget().unwrap(), Amount::from_sats(120));
    }

    #[test]
    fn test_parse_address() {
        let addr = parse_address("0x751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        assert_eq!(addr[0], 0x75);
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("zz").is_err());
    }

    #[test]
    fn test_request_deserialization_defaults() {
        let req: TransactionRequest = serde_json::from_str(
            r#"{"data": "0x6080", "value": 0}"#,
        )
        .unwrap();
        assert_eq!(req.gas_limit, DEFAULT_GAS_LIMIT);
        assert_eq!(req.gas_price, DEFAULT_GAS_PRICE);
        assert_eq!(req.data, vec![0x60, 0x80]);
        assert!(req.to.is_none());
    }
}
