//! Command line tool to build, sign and broadcast ledger transactions.

pub mod broadcaster;
pub mod commands;
pub mod config;
pub mod context;
pub mod errors;

// Re-export commonly used types and functions
pub use broadcaster::{Broadcaster, RepeatHandle};
pub use config::{ClientConfig, Endpoint};
pub use context::RequestContext;
pub use errors::CliError;
