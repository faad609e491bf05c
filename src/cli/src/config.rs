//! Configuration for the command line tool.

use crate::errors::CliError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Protocol used when neither `--api` nor `API_PROTOCOL` is given.
pub const DEFAULT_PROTOCOL: &str = "http";

/// Host used when neither `--api` nor `API_IP` is given.
pub const DEFAULT_IP: &str = "[::1]";

/// Port used when neither `--api` nor `API_PORT` is given.
pub const DEFAULT_PORT: u16 = 3001;

/// Settings that can come from a config file and be overridden by flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Plain-text private key
    pub key: Option<String>,
    /// Path of a key file
    pub file: Option<PathBuf>,
    /// Username of the transactor
    pub me: Option<String>,
    /// Base URL of the ledger API
    pub api: Option<String>,
    /// Resend delay in milliseconds
    pub spam: Option<u64>,
}

impl ClientConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let mut file = File::open(path.as_ref())
            .map_err(|e| CliError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Fills every unset field from `other`.
    pub fn or(self, other: ClientConfig) -> ClientConfig {
        ClientConfig {
            key: self.key.or(other.key),
            file: self.file.or(other.file),
            me: self.me.or(other.me),
            api: self.api.or(other.api),
            spam: self.spam.or(other.spam),
        }
    }

    /// Gets the repeat interval, if repeat mode is on.
    pub fn spam_interval(&self) -> Option<Duration> {
        self.spam.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}

/// The ledger API the tool talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Uses `base` as the API root, e.g. `http://127.0.0.1:3001`.
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves the endpoint from an explicit override or the environment.
    pub fn resolve(api: Option<&str>) -> Self {
        Self::from_parts(
            api,
            env::var("API_PROTOCOL").ok(),
            env::var("API_IP").ok(),
            env::var("API_PORT").ok(),
        )
    }

    /// Resolves the endpoint: the override wins, then each part falls back
    /// to its default. Empty parts count as unset.
    pub fn from_parts(
        api: Option<&str>,
        protocol: Option<String>,
        ip: Option<String>,
        port: Option<String>,
    ) -> Self {
        if let Some(api) = api.filter(|a| !a.is_empty()) {
            return Self::new(api);
        }
        let set = |part: Option<String>| part.filter(|p| !p.is_empty());
        let protocol = set(protocol).unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());
        let ip = set(ip).unwrap_or_else(|| DEFAULT_IP.to_string());
        let port = set(port).unwrap_or_else(|| DEFAULT_PORT.to_string());
        Self::new(&format!("{}://{}:{}", protocol, ip, port))
    }

    /// Gets the API root.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Gets the URL transactions are posted to.
    pub fn transact_url(&self) -> String {
        format!("{}/transact", self.base)
    }
}
