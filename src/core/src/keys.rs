//! secp256k1 keys and their base-58 text form.

use crate::encoding::{decode_base58_array, encode_base58};
use crate::errors::CoreError;
use secp256k1::{SecretKey, SECP256K1};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a private scalar in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of a compressed public point in bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// A private scalar that passed curve validity (nonzero, below the group order).
#[derive(Clone, Copy)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Checks curve validity of a raw 32-byte candidate.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Result<Self, CoreError> {
        SecretKey::from_slice(bytes)
            .map(PrivateKey)
            .map_err(|e| CoreError::InvalidKey(e.to_string()))
    }

    /// Decodes a base-58 private key.
    pub fn from_base58(text: &str) -> Result<Self, CoreError> {
        let bytes = decode_base58_array::<PRIVATE_KEY_LEN>(text)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw scalar.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.0.secret_bytes()
    }

    /// Returns the base-58 text form.
    pub fn to_base58(&self) -> String {
        encode_base58(&self.to_bytes())
    }

    /// Derives the compressed public point.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key(SECP256K1))
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.0
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// A compressed secp256k1 public point.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    /// Parses a compressed or uncompressed point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        secp256k1::PublicKey::from_slice(bytes)
            .map(PublicKey)
            .map_err(|e| CoreError::InvalidKey(e.to_string()))
    }

    /// Decodes a base-58 compressed public key.
    pub fn from_base58(text: &str) -> Result<Self, CoreError> {
        let bytes = decode_base58_array::<PUBLIC_KEY_LEN>(text)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the 33-byte compressed form.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.0.serialize()
    }

    /// Returns the base-58 text form of the compressed point.
    pub fn to_base58(&self) -> String {
        encode_base58(&self.to_bytes())
    }

    pub(crate) fn inner(&self) -> &secp256k1::PublicKey {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// A private key together with its public point.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Builds the pair from a private key.
    pub fn from_private(private_key: PrivateKey) -> Self {
        Self {
            public_key: private_key.public_key(),
            private_key,
        }
    }

    /// Gets the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Gets the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns the printable record of this pair.
    pub fn record(&self) -> KeyPairRecord {
        KeyPairRecord {
            public: self.public_key.to_base58(),
            private: self.private_key.to_base58(),
        }
    }
}

/// The JSON form of a keypair, `{"pub": "...", "priv": "..."}`.
///
/// This is also a valid key file: its `priv` field is what key resolution reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPairRecord {
    /// Base-58 public key
    #[serde(rename = "pub")]
    pub public: String,
    /// Base-58 private key
    #[serde(rename = "priv")]
    pub private: String,
}
