//! Tests for the core crate.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::fs;
use std::sync::atomic::AtomicBool;
use tempfile::tempdir;
use tx_core::{
    codec, generate_keypair, generate_keypair_until, generate_keypair_with, resolve_credentials,
    verify_transaction, CoreError, Payload, PrivateKey, Signer, TransactionBuilder, TransactionKind,
};

/// A fixed key shared by the scenario tests.
fn alice_key() -> PrivateKey {
    PrivateKey::from_bytes(&[0x2a; 32]).unwrap()
}

/// Tests that every kind produces exactly its registered fields.
#[test]
fn test_field_sets_per_kind() {
    let builder = TransactionBuilder::new("alice").timestamp(1);
    let cases: Vec<(TransactionKind, Vec<&str>, Vec<&str>)> = vec![
        (TransactionKind::CreateAccount, vec!["pubkey", "carol"], vec!["name", "pub"]),
        (TransactionKind::ApproveNode, vec!["leader1"], vec!["target"]),
        (TransactionKind::DisapproveNode, vec!["leader1"], vec!["target"]),
        (TransactionKind::Transfer, vec!["bob", "10"], vec!["amount", "receiver"]),
        (
            TransactionKind::Comment,
            vec!["my-post", "", "", r#"{"title":"hi"}"#, "1", "news"],
            vec!["json", "link", "pa", "pp", "tag", "vt"],
        ),
        (TransactionKind::Profile, vec![r#"{"about":"me"}"#], vec!["json"]),
        (TransactionKind::Follow, vec!["bob"], vec!["target"]),
        (TransactionKind::Unfollow, vec!["bob"], vec!["target"]),
        (TransactionKind::NewKey, vec!["k1", "pubkey", "[4,5]"], vec!["id", "pub", "types"]),
        (TransactionKind::RemoveKey, vec!["k1"], vec!["id"]),
        (TransactionKind::ChangePassword, vec!["pubkey"], vec!["pub"]),
    ];
    assert_eq!(cases.len(), TransactionKind::all().count());

    for (kind, args, expected) in cases {
        let tx = builder.build_args(kind, &args[..]).unwrap();
        let mut names: Vec<&str> = tx.payload.data().keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(names, expected, "fields of {}", kind);

        // One argument short is rejected
        assert!(matches!(
            builder.build_args(kind, &args[1..]),
            Err(CoreError::MalformedArgument(_))
        ));
    }
}

/// Tests that typed fields get typed JSON values.
#[test]
fn test_field_types() {
    let builder = TransactionBuilder::new("alice").timestamp(1);

    let tx = builder
        .build_args(TransactionKind::Comment, &["post", "bob", "p1", r#"{"a":[1,2]}"#, "-3", "t"])
        .unwrap();
    assert_eq!(tx.payload.get("json"), Some(&json!({"a": [1, 2]})));
    assert_eq!(tx.payload.get("vt"), Some(&json!(-3)));

    let tx = builder
        .build_args(TransactionKind::NewKey, &["k1", "pubkey", "[4,5,6,7,8]"])
        .unwrap();
    assert_eq!(tx.payload.get("types"), Some(&json!([4, 5, 6, 7, 8])));

    assert!(builder
        .build_args(TransactionKind::Transfer, &["bob", "ten"])
        .is_err());
    assert!(builder
        .build_args(TransactionKind::NewKey, &["k1", "pubkey", "[\"4\"]"])
        .is_err());
    assert!(builder
        .build_args(TransactionKind::Profile, &["{not json"])
        .is_err());
}

/// Tests that the public key is a pure function of the private key.
#[test]
fn test_public_key_derivation_is_deterministic() {
    let key = alice_key();
    let again = PrivateKey::from_base58(&key.to_base58()).unwrap();
    assert_eq!(key.public_key(), again.public_key());
    assert_eq!(key.public_key().to_base58(), again.public_key().to_base58());

    let other = PrivateKey::from_bytes(&[0x2b; 32]).unwrap();
    assert_ne!(key.public_key(), other.public_key());
}

/// Tests signing and verification of a transfer, and that any change breaks it.
#[test]
fn test_transfer_scenario() {
    let key = alice_key();
    let public = key.public_key();
    let tx = TransactionBuilder::new("alice")
        .timestamp(1_600_000_000_000)
        .build(Payload::transfer("bob", 777));
    let signed = Signer::new(key).sign(tx).unwrap();

    assert_eq!(signed.kind, TransactionKind::Transfer);
    assert_eq!(signed.hash.len(), 64);
    verify_transaction(&signed, &public).unwrap();

    let wire: Value = serde_json::from_str(&signed.to_json()).unwrap();
    assert_eq!(wire["type"], json!(3));
    assert_eq!(wire["data"], json!({"receiver": "bob", "amount": 777}));
    assert_eq!(wire["sender"], json!("alice"));
    assert_eq!(wire["ts"], json!(1_600_000_000_000u64));

    let mut changed = signed.clone();
    changed.data.insert("amount".to_string(), json!(778));
    assert!(matches!(
        verify_transaction(&changed, &public),
        Err(CoreError::InvalidSignature(_))
    ));

    let mut changed = signed.clone();
    changed.sender = "mallory".to_string();
    assert!(verify_transaction(&changed, &public).is_err());

    let mut changed = signed.clone();
    changed.ts += 1;
    assert!(verify_transaction(&changed, &public).is_err());

    let mut changed = signed.clone();
    changed.kind = TransactionKind::Follow;
    assert!(verify_transaction(&changed, &public).is_err());

    // A re-hashed forgery still fails on the signature
    let mut forged = signed.clone();
    forged.data.insert("amount".to_string(), json!(778));
    forged.hash = hex_digest(&forged.canonical_bytes());
    assert!(verify_transaction(&forged, &public).is_err());

    let stranger = PrivateKey::from_bytes(&[0x2b; 32]).unwrap().public_key();
    assert!(verify_transaction(&signed, &stranger).is_err());
}

fn hex_digest(bytes: &[u8]) -> String {
    tx_core::signer::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Tests that signing is deterministic for identical input.
#[test]
fn test_signing_is_deterministic() {
    let build = || {
        let tx = TransactionBuilder::new("alice")
            .timestamp(42)
            .build(Payload::follow("bob"));
        Signer::new(alice_key()).sign(tx).unwrap()
    };
    assert_eq!(build(), build());
}

/// Tests that the canonical form does not depend on field order.
#[test]
fn test_canonical_form_ignores_field_order() {
    let forward = Payload::from_fields(
        TransactionKind::Comment,
        vec![
            ("link", json!("post")),
            ("pa", json!("")),
            ("pp", json!("")),
            ("json", json!({"b": 1, "a": {"d": 2, "c": 3}})),
            ("vt", json!(1)),
            ("tag", json!("t")),
        ],
    )
    .unwrap();
    let backward = Payload::from_fields(
        TransactionKind::Comment,
        vec![
            ("tag", json!("t")),
            ("vt", json!(1)),
            ("json", json!({"a": {"c": 3, "d": 2}, "b": 1})),
            ("pp", json!("")),
            ("pa", json!("")),
            ("link", json!("post")),
        ],
    )
    .unwrap();

    let builder = TransactionBuilder::new("alice").timestamp(7);
    let forward = builder.build(forward);
    let backward = builder.build(backward);
    assert_eq!(forward.canonical_bytes(), backward.canonical_bytes());

    let text = String::from_utf8(forward.canonical_bytes()).unwrap();
    assert!(text.contains(r#""json":{"a":{"c":3,"d":2},"b":1}"#));
    assert_eq!(
        codec::to_canonical_string(&json!({"z": 1, "a": [{"y": 2, "b": 3}]})),
        r#"{"a":[{"b":3,"y":2}],"z":1}"#
    );
}

/// Tests building and signing from a raw transaction, as the sign command does.
#[test]
fn test_raw_transaction() {
    let builder = TransactionBuilder::new("alice").timestamp(5);
    let tx = builder
        .build_raw(r#"{"type":7,"data":{"target":"bob"}}"#)
        .unwrap();
    assert_eq!(tx.kind(), TransactionKind::Follow);

    let signed = Signer::new(alice_key()).sign(tx).unwrap();
    verify_transaction(&signed, &alice_key().public_key()).unwrap();

    assert!(builder.build_raw(r#"{"type":5,"data":{}}"#).is_err());
    assert!(builder
        .build_raw(r#"{"type":7,"data":{"target":"bob","extra":1}}"#)
        .is_err());
    assert!(builder.build_raw("not json").is_err());
}

/// Tests that a structured and a raw key file resolve to the same key.
#[test]
fn test_key_file_forms() {
    let dir = tempdir().unwrap();
    let key = alice_key();
    let record = tx_core::KeyPair::from_private(key).record();

    let structured = dir.path().join("key.json");
    fs::write(&structured, serde_json::to_string(&record).unwrap()).unwrap();
    let raw = dir.path().join("key.txt");
    fs::write(&raw, format!("{}\n", key.to_base58())).unwrap();

    let a = resolve_credentials(None, Some(structured.as_path()), Some("alice")).unwrap();
    let b = resolve_credentials(None, Some(raw.as_path()), Some("alice")).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.private_key, key);

    // The file wins over an inline key
    let other = PrivateKey::from_bytes(&[0x2b; 32]).unwrap().to_base58();
    let c = resolve_credentials(Some(other.as_str()), Some(raw.as_path()), Some("alice")).unwrap();
    assert_eq!(c.private_key, key);
}

/// Tests the order and messages of credential failures.
#[test]
fn test_missing_credentials() {
    let err = resolve_credentials(None, None, None).unwrap_err();
    assert_eq!(err, CoreError::MissingCredential("no key?".to_string()));

    let err = resolve_credentials(Some("garbage"), None, None).unwrap_err();
    assert_eq!(err, CoreError::MissingCredential("no user?".to_string()));

    let err = resolve_credentials(Some("garbage"), None, Some("alice")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidKey(_)));

    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = resolve_credentials(None, Some(missing.as_path()), Some("alice")).unwrap_err();
    assert!(matches!(err, CoreError::MissingCredential(_)));

    let empty = dir.path().join("empty.json");
    fs::write(&empty, r#"{"pub":"x"}"#).unwrap();
    let err = resolve_credentials(None, Some(empty.as_path()), Some("alice")).unwrap_err();
    assert_eq!(err, CoreError::MissingCredential("no key?".to_string()));
}

/// Tests vanity keypair generation.
#[test]
fn test_vanity_generation() {
    let keypair = generate_keypair("2").unwrap();
    assert!(keypair.public_key().to_base58().starts_with('2'));
    assert_eq!(keypair.private_key().public_key(), *keypair.public_key());

    let keypair = generate_keypair("").unwrap();
    let record = keypair.record();
    assert_eq!(
        PrivateKey::from_base58(&record.private).unwrap().public_key().to_base58(),
        record.public
    );

    for bad in ["0", "O", "I", "l", "2+"] {
        assert!(matches!(generate_keypair(bad), Err(CoreError::InvalidPrefix(_))));
    }
}

/// Tests that a seeded search is reproducible and can be cancelled.
#[test]
fn test_vanity_seeded_and_cancelled() {
    let cancel = AtomicBool::new(false);
    let a = generate_keypair_with(&mut StdRng::seed_from_u64(9), "2", &cancel).unwrap();
    let b = generate_keypair_with(&mut StdRng::seed_from_u64(9), "2", &cancel).unwrap();
    assert_eq!(a.keypair.record(), b.keypair.record());
    assert_eq!(a.attempts, b.attempts);
    assert!(a.attempts >= 1);

    // "A" is never the first character of a public key, so only the flag ends this
    let cancel = AtomicBool::new(true);
    assert!(matches!(
        generate_keypair_until("A", &cancel),
        Err(CoreError::Cancelled)
    ));
}
