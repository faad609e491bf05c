//! Commands for the command line tool.

pub mod keypair;
pub mod kinds;
pub mod send;
pub mod sign;

use tracing::warn;

/// Resolves on Ctrl-C.
///
/// If the signal handler cannot be installed this never resolves, so the
/// caller keeps running instead of treating the failure as an interrupt.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
