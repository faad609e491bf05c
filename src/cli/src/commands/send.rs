//! Send command: builds, signs and broadcasts one transaction kind.

use super::interrupted;
use crate::broadcaster::Broadcaster;
use crate::context::RequestContext;
use crate::errors::CliError;
use tracing::info;
use tx_core::{SignedTransaction, Signer, TransactionBuilder, TransactionKind};

/// Builds and signs a transaction from command-line arguments.
pub fn prepare<S: AsRef<str>>(
    ctx: &RequestContext,
    kind: TransactionKind,
    args: &[S],
) -> Result<SignedTransaction, CliError> {
    let tx = TransactionBuilder::new(ctx.credentials.sender.as_str()).build_args(kind, args)?;
    let signed = Signer::new(ctx.credentials.private_key).sign(tx)?;
    Ok(signed)
}

/// Runs a transaction command.
///
/// Without repeat mode the transaction is posted once. With repeat mode it is
/// posted on every tick until Ctrl-C.
pub async fn run<S: AsRef<str>>(
    ctx: &RequestContext,
    kind: TransactionKind,
    args: &[S],
) -> Result<(), CliError> {
    let signed = prepare(ctx, kind, args)?;
    let broadcaster = Broadcaster::new(&ctx.endpoint);
    info!(
        "Sending {} transaction {} from {} to {}",
        signed.kind,
        signed.hash,
        signed.sender,
        broadcaster.url()
    );

    match ctx.spam {
        None => broadcaster.send(&signed).await,
        Some(interval) => {
            info!("Resending every {:?} until interrupted", interval);
            let handle = broadcaster.repeat(signed, interval);
            interrupted().await;
            handle.stop();
            info!("Repeat mode stopped");
            Ok(())
        }
    }
}
