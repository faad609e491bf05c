//! Text encodings used for keys, signatures and digests.

use crate::errors::CoreError;

/// The base-58 alphabet used for every key and signature.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encodes bytes as base-58.
pub fn encode_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decodes a base-58 string.
pub fn decode_base58(text: &str) -> Result<Vec<u8>, CoreError> {
    bs58::decode(text)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| CoreError::InvalidKey(format!("not base-58: {}", e)))
}

/// Decodes a base-58 string that must hold exactly `N` bytes.
pub fn decode_base58_array<const N: usize>(text: &str) -> Result<[u8; N], CoreError> {
    let bytes = decode_base58(text)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CoreError::InvalidKey(format!("expected {} bytes, got {}", N, len)))
}

/// Returns the first character of `prefix` that base-58 text can never contain.
pub fn first_non_base58(prefix: &str) -> Option<char> {
    prefix.chars().find(|c| !BASE58_ALPHABET.contains(*c))
}
