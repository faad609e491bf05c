//! ECDSA signing and verification over secp256k1.
//!
//! A signature covers the SHA-256 digest of the canonical bytes. Nonces are
//! derived deterministically (RFC 6979), so signing the same bytes with the
//! same key always yields the same low-S signature. Signatures travel as the
//! base-58 text of their 64-byte compact form.

use crate::encoding::{decode_base58, encode_base58};
use crate::errors::CoreError;
use crate::keys::{PrivateKey, PublicKey, PRIVATE_KEY_LEN};
use crate::types::{SignedTransaction, Transaction};
use secp256k1::{ecdsa, Message, SECP256K1};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Length of a compact signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Computes the SHA-256 digest of `bytes`.
pub fn digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

fn message(bytes: &[u8]) -> Result<Message, CoreError> {
    Message::from_slice(&digest(bytes)).map_err(|e| CoreError::InvalidSignature(e.to_string()))
}

/// Signs canonical bytes and transactions with one private key.
#[derive(Clone, Debug)]
pub struct Signer {
    key: PrivateKey,
}

impl Signer {
    /// Creates a signer for a validated key.
    pub fn new(key: PrivateKey) -> Self {
        Self { key }
    }

    /// Creates a signer from a raw scalar, checking curve validity.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Result<Self, CoreError> {
        PrivateKey::from_bytes(bytes).map(Self::new)
    }

    /// Creates a signer from a base-58 private key.
    pub fn from_base58(text: &str) -> Result<Self, CoreError> {
        PrivateKey::from_base58(text).map(Self::new)
    }

    /// Gets the public key that verifies this signer's signatures.
    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Signs canonical bytes, returning the base-58 signature.
    pub fn sign_bytes(&self, bytes: &[u8]) -> Result<String, CoreError> {
        let signature = SECP256K1.sign_ecdsa(&message(bytes)?, self.key.secret_key());
        Ok(encode_base58(&signature.serialize_compact()))
    }

    /// Signs a transaction, consuming it.
    pub fn sign(&self, tx: Transaction) -> Result<SignedTransaction, CoreError> {
        let bytes = tx.canonical_bytes();
        let hash = hex::encode(digest(&bytes));
        let signature = self.sign_bytes(&bytes)?;
        debug!("Signed {} transaction {} for {}", tx.kind(), hash, tx.sender);

        let (kind, data) = tx.payload.into_parts();
        Ok(SignedTransaction {
            kind,
            data,
            sender: tx.sender,
            ts: tx.ts,
            hash,
            signature,
        })
    }
}

/// Verifies a base-58 signature over canonical bytes.
pub fn verify(bytes: &[u8], signature: &str, public_key: &PublicKey) -> Result<(), CoreError> {
    let raw = decode_base58(signature)
        .map_err(|_| CoreError::InvalidSignature("signature is not base-58".to_string()))?;
    if raw.len() != SIGNATURE_LEN {
        return Err(CoreError::InvalidSignature(format!(
            "expected {} bytes, got {}",
            SIGNATURE_LEN,
            raw.len()
        )));
    }
    let signature = ecdsa::Signature::from_compact(&raw)
        .map_err(|e| CoreError::InvalidSignature(e.to_string()))?;
    SECP256K1
        .verify_ecdsa(&message(bytes)?, &signature, public_key.inner())
        .map_err(|e| CoreError::InvalidSignature(e.to_string()))
}

/// Verifies a signed transaction against the sender's public key.
///
/// The canonical bytes are recomputed from the envelope fields, so both the
/// embedded hash and the signature must match the current content.
pub fn verify_transaction(tx: &SignedTransaction, public_key: &PublicKey) -> Result<(), CoreError> {
    let bytes = tx.canonical_bytes();
    if hex::encode(digest(&bytes)) != tx.hash {
        return Err(CoreError::InvalidSignature("hash does not match content".to_string()));
    }
    verify(&bytes, &tx.signature, public_key)
}
