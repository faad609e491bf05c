//! Resolution of the signing key and sender identity.
//!
//! A key is given either inline or through a key file. A key file holds either
//! a JSON record with a `priv` field (the output of the keypair command is
//! such a record) or the bare base-58 key.

use crate::errors::CoreError;
use crate::keys::PrivateKey;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Structured key file.
#[derive(Debug, Deserialize)]
struct KeyFile {
    #[serde(rename = "priv")]
    private: Option<String>,
}

/// A resolved private key and the account it signs for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// The private key used for signing
    pub private_key: PrivateKey,
    /// The account identifier authorizing transactions
    pub sender: String,
}

/// Extracts the key string from key file contents.
///
/// Contents that parse as a JSON object yield their `priv` field (possibly
/// absent). Anything else is taken as the key itself, trimmed.
pub fn parse_key_file(contents: &str) -> Option<String> {
    let key = match serde_json::from_str::<KeyFile>(contents) {
        Ok(record) => record.private,
        Err(_) => Some(contents.trim().to_string()),
    };
    key.filter(|k| !k.is_empty())
}

/// Reads a key file and extracts its key string.
pub fn read_key_file<P: AsRef<Path>>(path: P) -> Result<Option<String>, CoreError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| CoreError::MalformedKeyFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    debug!("Read key file {}", path.display());
    Ok(parse_key_file(&contents))
}

/// Picks the key string, a key file taking precedence over an inline key.
pub fn resolve_key(key: Option<&str>, file: Option<&Path>) -> Result<Option<String>, CoreError> {
    match file {
        Some(path) => read_key_file(path).map_err(|e| match e {
            CoreError::MalformedKeyFile { path, reason } => {
                CoreError::MissingCredential(format!("cannot read key file {}: {}", path, reason))
            }
            other => other,
        }),
        None => Ok(key.map(str::to_string).filter(|k| !k.is_empty())),
    }
}

/// Resolves the credentials for a signing request.
///
/// Both the key and the sender must be present before the key is decoded.
pub fn resolve_credentials(
    key: Option<&str>,
    file: Option<&Path>,
    sender: Option<&str>,
) -> Result<Credentials, CoreError> {
    let key = resolve_key(key, file)?
        .ok_or_else(|| CoreError::MissingCredential("no key?".to_string()))?;
    let sender = sender
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::MissingCredential("no user?".to_string()))?;

    let private_key = PrivateKey::from_base58(&key)?;
    Ok(Credentials {
        private_key,
        sender: sender.to_string(),
    })
}
