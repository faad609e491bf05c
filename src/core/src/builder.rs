//! Construction of unsigned transactions.

use crate::errors::CoreError;
use crate::kinds::TransactionKind;
use crate::payload::Payload;
use crate::types::{now_millis, Timestamp, Transaction};

/// Attaches a sender and a timestamp to payloads.
///
/// ```
/// use tx_core::{Payload, TransactionBuilder};
///
/// let tx = TransactionBuilder::new("alice")
///     .timestamp(1_600_000_000_000)
///     .build(Payload::transfer("bob", 777));
/// assert_eq!(tx.sender, "alice");
/// ```
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    sender: String,
    ts: Option<Timestamp>,
}

impl TransactionBuilder {
    /// Creates a builder for transactions authorized by `sender`.
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            ts: None,
        }
    }

    /// Fixes the timestamp instead of reading the clock at build time.
    pub fn timestamp(mut self, ts: Timestamp) -> Self {
        self.ts = Some(ts);
        self
    }

    /// Builds a transaction around a payload.
    pub fn build(&self, payload: Payload) -> Transaction {
        Transaction {
            payload,
            sender: self.sender.clone(),
            ts: self.ts.unwrap_or_else(now_millis),
        }
    }

    /// Builds a transaction from command-line arguments of a kind.
    pub fn build_args<S: AsRef<str>>(&self, kind: TransactionKind, args: &[S]) -> Result<Transaction, CoreError> {
        Ok(self.build(Payload::from_args(kind, args)?))
    }

    /// Builds a transaction from a raw `{"type": .., "data": ..}` JSON string.
    pub fn build_raw(&self, raw: &str) -> Result<Transaction, CoreError> {
        Ok(self.build(Payload::from_raw_transaction(raw)?))
    }
}
