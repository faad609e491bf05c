//! Tests for the cli crate.

use crate::broadcast_tests::mock_ledger;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use tx_cli::commands::{kinds, send, sign};
use tx_cli::{CliError, ClientConfig, RequestContext};
use tx_core::{verify_transaction, CoreError, KeyPair, PrivateKey, SignedTransaction, TransactionKind};
use warp::http::StatusCode;

fn alice_config(api: &str) -> ClientConfig {
    ClientConfig {
        key: Some(PrivateKey::from_bytes(&[0x2a; 32]).unwrap().to_base58()),
        me: Some("alice".to_string()),
        api: Some(api.to_string()),
        ..Default::default()
    }
}

/// Tests that a transfer command reaches the ledger signed by the sender.
#[tokio::test]
async fn test_send_transfer() {
    let (url, inbox) = mock_ledger(StatusCode::OK);
    let ctx = RequestContext::from_config(&alice_config(&url)).unwrap();

    send::run(&ctx, TransactionKind::Transfer, &["bob", "777"]).await.unwrap();

    let received = inbox.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let tx = SignedTransaction::from_json(std::str::from_utf8(&received[0].body).unwrap()).unwrap();
    assert_eq!(tx.kind, TransactionKind::Transfer);
    assert_eq!(tx.sender, "alice");
    assert_eq!(tx.data.get("amount"), Some(&serde_json::json!(777)));
    verify_transaction(&tx, &ctx.credentials.private_key.public_key()).unwrap();
}

/// Tests that bad arguments fail before anything is sent.
#[tokio::test]
async fn test_send_bad_arguments() {
    let (url, inbox) = mock_ledger(StatusCode::OK);
    let ctx = RequestContext::from_config(&alice_config(&url)).unwrap();

    let err = send::run(&ctx, TransactionKind::Transfer, &["bob", "lots"])
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Core(CoreError::MalformedArgument(_))));
    assert!(inbox.lock().unwrap().is_empty());
}

/// Tests that a refused transaction surfaces as a transport error.
#[tokio::test]
async fn test_send_refused() {
    let (url, _inbox) = mock_ledger(StatusCode::INTERNAL_SERVER_ERROR);
    let ctx = RequestContext::from_config(&alice_config(&url)).unwrap();

    let err = send::run(&ctx, TransactionKind::Follow, &["bob"]).await.unwrap_err();
    assert!(matches!(err, CliError::Transport(_)));
}

/// Tests that the endpoint comes from the environment when no override is given.
#[tokio::test]
#[serial]
async fn test_endpoint_from_environment() {
    let (url, inbox) = mock_ledger(StatusCode::OK);
    let port = url.rsplit(':').next().unwrap().to_string();

    env::set_var("API_PROTOCOL", "http");
    env::set_var("API_IP", "127.0.0.1");
    env::set_var("API_PORT", &port);

    let mut config = alice_config("");
    config.api = None;
    let ctx = RequestContext::from_config(&config).unwrap();
    assert_eq!(ctx.endpoint.transact_url(), format!("{}/transact", url));

    send::run(&ctx, TransactionKind::Unfollow, &["bob"]).await.unwrap();
    assert_eq!(inbox.lock().unwrap().len(), 1);

    env::remove_var("API_PROTOCOL");
    env::remove_var("API_IP");
    env::remove_var("API_PORT");
}

/// Tests that flags win over a configuration file with a key file.
#[test]
fn test_config_file_merge() {
    let dir = tempdir().unwrap();
    let key = PrivateKey::from_bytes(&[0x2a; 32]).unwrap();
    let key_path = dir.path().join("alice.json");
    fs::write(&key_path, serde_json::to_string(&KeyPair::from_private(key).record()).unwrap()).unwrap();

    let config_path = dir.path().join("config.json");
    let file_config = ClientConfig {
        file: Some(key_path),
        me: Some("alice".to_string()),
        api: Some("http://ledger:3001".to_string()),
        spam: Some(500),
        ..Default::default()
    };
    file_config.to_file(&config_path).unwrap();

    let flags = ClientConfig {
        me: Some("carol".to_string()),
        spam: Some(0),
        ..Default::default()
    };
    let config = flags.or(ClientConfig::from_file(&config_path).unwrap());
    let ctx = RequestContext::from_config(&config).unwrap();

    assert_eq!(ctx.credentials.private_key, key);
    assert_eq!(ctx.credentials.sender, "carol");
    assert_eq!(ctx.endpoint.transact_url(), "http://ledger:3001/transact");
    // Zero turns repeat mode off
    assert_eq!(ctx.spam, None);

    let config = ClientConfig::from_file(&config_path).unwrap();
    assert_eq!(config.spam_interval(), Some(Duration::from_millis(500)));
}

/// Tests the sign command and the kinds listing.
#[test]
fn test_sign_and_kinds() {
    let ctx = RequestContext::from_config(&alice_config("http://ledger:3001")).unwrap();
    let signed = sign::run(&ctx, r#"{"type":3,"data":{"receiver":"bob","amount":778}}"#).unwrap();
    assert_eq!(signed.kind, TransactionKind::Transfer);
    verify_transaction(&signed, &ctx.credentials.private_key.public_key()).unwrap();

    let err = sign::run(&ctx, r#"{"type":3,"data":{"receiver":"bob","amount":"778"}}"#).unwrap_err();
    assert!(matches!(err, CliError::Core(CoreError::MalformedArgument(_))));

    let listing = kinds::run();
    assert!(listing.starts_with("Transaction Types:"));
    assert!(listing.contains("new-key <id> <pub> <types>"));
    assert!(listing.contains("(alias: subscribe)"));
}

/// Tests that missing credentials stop the command with the bare message.
#[test]
fn test_missing_credentials() {
    let err = RequestContext::from_config(&ClientConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "no key?");
}
