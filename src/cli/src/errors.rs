//! Error types for the command line tool.

use std::error::Error as StdError;
use std::fmt;
use tx_core::CoreError;

/// Errors that can occur in the command line tool.
#[derive(Debug)]
pub enum CliError {
    /// Error from the signing pipeline.
    Core(CoreError),

    /// Error when submitting to the ledger fails or is refused.
    Transport(String),

    /// Error when the configuration is unusable.
    Config(String),

    /// Error when JSON serialization or deserialization fails.
    Json(serde_json::Error),

    /// Error when a file operation fails.
    Io(std::io::Error),

    /// Error when a background task cannot complete.
    Runtime(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Missing credentials are reported with their bare message
            CliError::Core(CoreError::MissingCredential(msg)) => write!(f, "{}", msg),
            CliError::Core(e) => write!(f, "{}", e),
            CliError::Transport(msg) => write!(f, "{}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "File error: {}", e),
            CliError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl StdError for CliError {}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        CliError::Core(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Json(error)
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<reqwest::Error> for CliError {
    fn from(error: reqwest::Error) -> Self {
        CliError::Transport(error.to_string())
    }
}
