//! Keypair command for the command line tool.

use super::interrupted;
use crate::errors::CliError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use tx_core::{generate_keypair_until, KeyPairRecord};

/// Runs the keypair command.
///
/// The search runs on a blocking thread and is cancelled on Ctrl-C.
pub async fn run(prefix: Option<String>) -> Result<KeyPairRecord, CliError> {
    let prefix = prefix.unwrap_or_default();
    let cancel = Arc::new(AtomicBool::new(false));

    let flag = cancel.clone();
    let search_prefix = prefix.clone();
    let mut search = tokio::task::spawn_blocking(move || generate_keypair_until(&search_prefix, &flag));

    let finished = tokio::select! {
        joined = &mut search => Some(joined),
        _ = interrupted() => None,
    };
    let joined = match finished {
        Some(joined) => joined,
        None => {
            info!("Interrupted, stopping keypair search");
            cancel.store(true, Ordering::Relaxed);
            search.await
        }
    };

    let generated = joined.map_err(|e| CliError::Runtime(e.to_string()))??;
    debug!(
        "Generated keypair for prefix {:?} in {} attempts",
        prefix, generated.attempts
    );
    Ok(generated.keypair.record())
}
