//! Usage counter reader
//!
//! Looks up the system-wide scrape counter concurrently with parsing. The
//! counter is cosmetic: every failure mode degrades to "no value" and must
//! never fail or delay the scrape itself.

use crate::storage::{CounterStore, USAGE_KEY};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Reads the current usage count from the store
///
/// Sends the value through `count_tx` when the store holds a positive
/// count. When the store has no record yet, holds zero, or the lookup
/// fails, the sender is simply dropped without sending; the receiver's
/// channel-closed error is the "no value" completion signal.
///
/// The store call is synchronous, so it runs on a blocking thread rather
/// than stalling the runtime.
pub async fn read_usage_count(store: Arc<dyn CounterStore>, count_tx: oneshot::Sender<u64>) {
    let lookup = tokio::task::spawn_blocking(move || store.read(USAGE_KEY)).await;

    match lookup {
        Ok(Ok(Some(count))) if count > 0 => {
            // The orchestrator may already have shut down; that is fine.
            let _ = count_tx.send(count);
        }
        Ok(Ok(_)) => {
            tracing::debug!("No usage count recorded yet");
        }
        Ok(Err(e)) => {
            tracing::debug!("Usage counter lookup failed: {}", e);
        }
        Err(e) => {
            tracing::debug!("Usage counter task failed: {}", e);
        }
    }
}
