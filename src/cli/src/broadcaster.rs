//! Submission of signed transactions to the ledger.

use crate::config::Endpoint;
use crate::errors::CliError;
use colored::Colorize;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use tx_core::SignedTransaction;

/// Value of the `Accept` header sent with every submission.
pub const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// Posts signed transactions to `{endpoint}/transact`.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    client: reqwest::Client,
    url: String,
}

impl Broadcaster {
    /// Creates a broadcaster for an endpoint.
    pub fn new(endpoint: &Endpoint) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: endpoint.transact_url(),
        }
    }

    /// Gets the URL transactions are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submits a transaction once.
    ///
    /// Only a `200 OK` answer counts as success.
    pub async fn send(&self, tx: &SignedTransaction) -> Result<(), CliError> {
        debug!("Posting transaction {} to {}", tx.hash, self.url);
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, ACCEPT_VALUE)
            .header(CONTENT_TYPE, "application/json")
            .body(tx.to_wire())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(CliError::Transport(
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string()),
            ))
        }
    }

    /// Resubmits the same transaction every `interval` until the handle is dropped.
    ///
    /// The first submission happens immediately. Each submission runs on its
    /// own task without waiting for earlier ones; failures are reported and
    /// the loop keeps going.
    pub fn repeat(&self, tx: SignedTransaction, interval: Duration) -> RepeatHandle {
        let broadcaster = self.clone();
        let tx = Arc::new(tx);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let broadcaster = broadcaster.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = broadcaster.send(&tx).await {
                        report(&e);
                    }
                });
            }
        });
        RepeatHandle { task }
    }
}

/// Prints a failed submission the way the operator expects to see it.
pub fn report(err: &CliError) {
    warn!("Submission failed: {}", err);
    println!("{} {}", "Err:".red(), err);
}

/// Keeps a repeat loop alive; dropping it stops the loop.
#[derive(Debug)]
pub struct RepeatHandle {
    task: JoinHandle<()>,
}

impl RepeatHandle {
    /// Stops the loop. Submissions already in flight still complete.
    pub fn stop(self) {
        self.task.abort();
    }

    /// Whether the loop has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RepeatHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
