//! Tests for the RPC client.

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qtum_primitives::Amount;
use qtum_transaction::{Transaction, UtxoSource, UtxoSourceError};

use crate::client::QtumClient;

const ADDRESS: &str = "0x751e76e8199196d454941c45d1b3a323f1433bd6";

#[tokio::test]
async fn test_get_utxos() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(serde_json::json!({
            "jsonrpc": "2.0",
            "method": "qtum_getUTXOs",
            "params": [ADDRESS, "0.1000000"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [
                {"txid": "aa".repeat(32), "vout": 0, "amount": "5.0"},
                {"txid": "bb".repeat(32), "vout": 1, "amount": "3.0000000"}
            ]
        })))
        .mount(&server)
        .await;

    let client = QtumClient::new(server.uri());
    let utxos = client
        .get_utxos(ADDRESS, Amount::from_sats(10_000_000))
        .await
        .unwrap();

    assert_eq!(utxos.len(), 2);
    assert_eq!(utxos[0].amount, Amount::from_coins(5));
    assert_eq!(utxos[1].vout, 1);
}

#[tokio::test]
async fn test_rpc_error_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32010, "message": "Insufficient funds for gas * price + value"}
        })))
        .mount(&server)
        .await;

    let client = QtumClient::new(server.uri());
    let err = client
        .get_utxos(ADDRESS, Amount::from_coins(1))
        .await
        .unwrap_err();
    assert!(err.is_insufficient_funds());

    // the UtxoSource impl keeps the insufficient-funds category
    let err = client
        .fetch_utxos(ADDRESS, Amount::from_coins(1))
        .await
        .unwrap_err();
    assert!(matches!(err, UtxoSourceError::InsufficientFunds(_)));
}

#[tokio::test]
async fn test_other_rpc_errors_are_source_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "header not found"}
        })))
        .mount(&server)
        .await;

    let client = QtumClient::new(server.uri());
    let err = client
        .fetch_utxos(ADDRESS, Amount::from_coins(1))
        .await
        .unwrap_err();
    assert!(matches!(err, UtxoSourceError::Source(_)));
}

#[tokio::test]
async fn test_send_raw_transaction() {
    let server = MockServer::start().await;
    let tx = Transaction::new();
    let expected_body = serde_json::json!({
        "method": "eth_sendRawTransaction",
        "params": [format!("0x{}", tx.to_hex())],
    });

    Mock::given(method("POST"))
        .and(body_partial_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": "0xdeadbeef"
        })))
        .mount(&server)
        .await;

    let client = QtumClient::new(server.uri());
    let hash = client.send_raw_transaction(&tx).await.unwrap();
    assert_eq!(hash, "0xdeadbeef");
}

#[tokio::test]
async fn test_malformed_utxo_amount_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [{"txid": "aa", "vout": 0, "amount": "many"}]
        })))
        .mount(&server)
        .await;

    let client = QtumClient::new(server.uri());
    assert!(client
        .get_utxos(ADDRESS, Amount::from_coins(1))
        .await
        .is_err());
}
