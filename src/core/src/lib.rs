//! Transaction signing pipeline.
//!
//! This crate turns a transaction kind and its arguments into a signed
//! envelope ready for the ledger: key resolution, vanity keypair generation,
//! payload building against the kind registry, canonical serialization and
//! secp256k1 signing.

pub mod builder;
pub mod codec;
pub mod encoding;
pub mod errors;
pub mod key_material;
pub mod keys;
pub mod kinds;
pub mod payload;
pub mod signer;
pub mod types;
pub mod vanity;

// Re-export commonly used types
pub use builder::TransactionBuilder;
pub use errors::CoreError;
pub use key_material::{resolve_credentials, Credentials};
pub use keys::{KeyPair, KeyPairRecord, PrivateKey, PublicKey};
pub use kinds::{FieldSpec, FieldType, KindSpec, TransactionKind, REGISTRY};
pub use payload::Payload;
pub use signer::{verify, verify_transaction, Signer};
pub use types::{SignedTransaction, Timestamp, Transaction};
pub use vanity::{generate_keypair, generate_keypair_until, generate_keypair_with, Generated};
