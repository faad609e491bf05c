//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the signing pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No private key or no sender could be resolved.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// A key file could not be read.
    #[error("Malformed key file {path}: {reason}")]
    MalformedKeyFile {
        /// The path of the key file
        path: String,
        /// Why the file could not be used
        reason: String,
    },

    /// A private or public key failed to decode or is not a valid curve value.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A vanity prefix contains a character that base-58 can never produce.
    #[error("Invalid prefix: {0:?} is not a base-58 character")]
    InvalidPrefix(char),

    /// Arguments do not match the field set of a transaction kind.
    #[error("Malformed argument: {0}")]
    MalformedArgument(String),

    /// A signature could not be decoded or does not verify.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// A keypair search was cancelled before it found a match.
    #[error("Keypair search cancelled")]
    Cancelled,

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::Serialization(error.to_string())
    }
}
