//! Sign command for the command line tool.

use crate::context::RequestContext;
use crate::errors::CliError;
use tracing::info;
use tx_core::{Signer, SignedTransaction, TransactionBuilder};

/// Runs the sign command: signs a raw transaction without broadcasting it.
pub fn run(ctx: &RequestContext, raw: &str) -> Result<SignedTransaction, CliError> {
    let tx = TransactionBuilder::new(ctx.credentials.sender.as_str()).build_raw(raw)?;
    let signed = Signer::new(ctx.credentials.private_key).sign(tx)?;
    info!("Signed {} transaction {}", signed.kind, signed.hash);
    Ok(signed)
}
