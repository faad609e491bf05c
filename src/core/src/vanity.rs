//! Keypair generation with an optional public key prefix.

use crate::encoding::first_non_base58;
use crate::errors::CoreError;
use crate::keys::{KeyPair, PrivateKey, PRIVATE_KEY_LEN};
use rand::RngCore;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Why a candidate scalar was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The bytes are zero or not below the group order.
    InvalidScalar,
    /// The encoded public key does not start with the prefix.
    PrefixMismatch,
}

/// The outcome of a successful search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generated {
    /// The accepted keypair
    pub keypair: KeyPair,
    /// Number of candidates sampled, the accepted one included
    pub attempts: u64,
}

/// Accepts or rejects one candidate scalar.
pub fn check_candidate(candidate: &[u8; PRIVATE_KEY_LEN], prefix: &str) -> Result<KeyPair, Rejection> {
    let private_key = PrivateKey::from_bytes(candidate).map_err(|_| Rejection::InvalidScalar)?;
    let keypair = KeyPair::from_private(private_key);
    if keypair.public_key().to_base58().starts_with(prefix) {
        Ok(keypair)
    } else {
        Err(Rejection::PrefixMismatch)
    }
}

/// Generates a keypair whose base-58 public key starts with `prefix`.
///
/// Blocks until a match is found. An empty prefix accepts the first valid
/// candidate.
pub fn generate_keypair(prefix: &str) -> Result<KeyPair, CoreError> {
    let cancel = AtomicBool::new(false);
    generate_keypair_with(&mut rand::thread_rng(), prefix, &cancel).map(|g| g.keypair)
}

/// Like [`generate_keypair`], but stops with `Cancelled` once `cancel` is set.
pub fn generate_keypair_until(prefix: &str, cancel: &AtomicBool) -> Result<Generated, CoreError> {
    generate_keypair_with(&mut rand::thread_rng(), prefix, cancel)
}

/// Samples candidates from `rng` until one matches or `cancel` is set.
pub fn generate_keypair_with<R: RngCore + ?Sized>(
    rng: &mut R,
    prefix: &str,
    cancel: &AtomicBool,
) -> Result<Generated, CoreError> {
    if let Some(c) = first_non_base58(prefix) {
        return Err(CoreError::InvalidPrefix(c));
    }

    let mut attempts = 0u64;
    let mut candidate = [0u8; PRIVATE_KEY_LEN];
    loop {
        if cancel.load(Ordering::Relaxed) {
            debug!("Keypair search cancelled after {} attempts", attempts);
            return Err(CoreError::Cancelled);
        }
        rng.fill_bytes(&mut candidate);
        attempts += 1;
        if let Ok(keypair) = check_candidate(&candidate, prefix) {
            debug!("Found keypair for prefix {:?} after {} attempts", prefix, attempts);
            return Ok(Generated { keypair, attempts });
        }
    }
}
