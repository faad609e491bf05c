//! The immutable request context built once from parsed input.

use crate::config::{ClientConfig, Endpoint};
use crate::errors::CliError;
use std::time::Duration;
use tx_core::{resolve_credentials, Credentials};

/// Everything a signing or sending command needs.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Signing key and sender
    pub credentials: Credentials,
    /// Where transactions are posted
    pub endpoint: Endpoint,
    /// Resend interval when repeat mode is on
    pub spam: Option<Duration>,
}

impl RequestContext {
    /// Resolves credentials and endpoint from the merged configuration.
    ///
    /// Fails before any other work when the key or the sender is missing.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CliError> {
        let credentials = resolve_credentials(
            config.key.as_deref(),
            config.file.as_deref(),
            config.me.as_deref(),
        )?;
        Ok(Self {
            credentials,
            endpoint: Endpoint::resolve(config.api.as_deref()),
            spam: config.spam_interval(),
        })
    }
}
