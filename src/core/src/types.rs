//! Transaction envelopes before and after signing.

use crate::codec;
use crate::errors::CoreError;
use crate::kinds::TransactionKind;
use crate::payload::Payload;
use serde_json::{json, Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Returns the current wall clock time in milliseconds.
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or_default()
}

/// An unsigned transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// What the transaction does
    pub payload: Payload,
    /// The account authorizing it
    pub sender: String,
    /// Construction time
    pub ts: Timestamp,
}

impl Transaction {
    /// Gets the kind of the payload.
    pub fn kind(&self) -> TransactionKind {
        self.payload.kind()
    }

    /// Returns the canonical bytes that get signed.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        codec::signing_bytes(self.kind(), self.payload.data(), &self.sender, self.ts)
    }
}

/// A signed transaction, as sent to the ledger.
///
/// The fields are public so the envelope can be inspected; any change to
/// `kind`, `data`, `sender` or `ts` after signing makes verification fail.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedTransaction {
    /// Transaction kind, sent as its numeric code under `type`
    pub kind: TransactionKind,
    /// Payload data object
    pub data: Map<String, Value>,
    /// The account authorizing the transaction
    pub sender: String,
    /// Construction time
    pub ts: Timestamp,
    /// Hex SHA-256 of the canonical bytes
    pub hash: String,
    /// Base-58 compact signature over the hash
    pub signature: String,
}

impl SignedTransaction {
    /// Recomputes the canonical bytes from the current field values.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        codec::signing_bytes(self.kind, &self.data, &self.sender, self.ts)
    }

    /// Returns the wire JSON value.
    pub fn to_value(&self) -> Value {
        json!({
            "type": self.kind.code(),
            "data": Value::Object(self.data.clone()),
            "sender": self.sender,
            "ts": self.ts,
            "hash": self.hash,
            "signature": self.signature,
        })
    }

    /// Returns the wire JSON with sorted keys, as posted to the ledger.
    pub fn to_wire(&self) -> Vec<u8> {
        codec::to_canonical_vec(&self.to_value())
    }

    /// Returns the wire JSON as a string.
    pub fn to_json(&self) -> String {
        String::from_utf8_lossy(&self.to_wire()).into_owned()
    }

    /// Parses a signed transaction from its wire JSON.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        let field = |name: &str| {
            value
                .get(name)
                .ok_or_else(|| CoreError::MalformedArgument(format!("missing field {}", name)))
        };
        let text_field = |name: &str| -> Result<String, CoreError> {
            field(name)?
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| CoreError::MalformedArgument(format!("{} must be a string", name)))
        };

        let code = field("type")?
            .as_u64()
            .ok_or_else(|| CoreError::MalformedArgument("type must be an integer".to_string()))?;
        let kind = TransactionKind::from_code(code)?;
        let data = field("data")?
            .as_object()
            .cloned()
            .ok_or_else(|| CoreError::MalformedArgument("data must be an object".to_string()))?;
        let ts = field("ts")?
            .as_u64()
            .ok_or_else(|| CoreError::MalformedArgument("ts must be an integer".to_string()))?;

        Ok(Self {
            kind,
            data,
            sender: text_field("sender")?,
            ts,
            hash: text_field("hash")?,
            signature: text_field("signature")?,
        })
    }
}
