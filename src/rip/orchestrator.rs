//! Scrape orchestrator
//!
//! Owns the lifetime of one scrape: starts the extractor and the counter
//! reader as independent concurrent producers, fans their outputs in over
//! channels, and decides overall completion.
//!
//! Completion rule: the receive loop exits only once BOTH producers have
//! finished, i.e. the link and host channels are closed and the counter
//! lookup has resolved one way or the other. A fast counter lookup can
//! therefore never cut off link extraction on a large document.

use crate::rip::{extract_links, read_usage_count, ByteStream, CHANNEL_CAPACITY};
use crate::storage::CounterStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use url::Url;

/// Everything one scrape accumulated
///
/// Links and hosts are in discovery order per producer stream; the order is
/// best-effort only, since the two streams race each other under the
/// concurrent consumer.
#[derive(Debug)]
pub struct RipOutcome {
    /// Every link found, resolved to absolute form where possible
    pub links: Vec<String>,

    /// The hostname of every link whose raw href parsed, repeats included
    pub hosts: Vec<String>,

    /// The stored usage count, 0 when the store had no value
    pub usage_count: u64,
}

/// Scrapes one page: runs the extractor and the counter reader to
/// completion and hands back everything they produced
///
/// Nothing in here fails: stream errors truncate extraction, counter
/// errors zero the count, and the outcome always reflects whatever was
/// collected.
///
/// # Arguments
///
/// * `target` - The validated absolute URL the byte stream was fetched from
/// * `body` - The open page body stream; ownership passes to the extractor
/// * `store` - Counter store capability for the usage lookup
pub async fn rip(target: &Url, body: ByteStream, store: Arc<dyn CounterStore>) -> RipOutcome {
    let (links_tx, mut links_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (hosts_tx, mut hosts_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (count_tx, mut count_rx) = oneshot::channel();

    tokio::spawn(extract_links(target.clone(), body, links_tx, hosts_tx));
    tokio::spawn(read_usage_count(store, count_tx));

    let mut links = Vec::new();
    let mut hosts = Vec::new();
    let mut usage_count = 0;

    let mut links_open = true;
    let mut hosts_open = true;
    let mut count_pending = true;

    while links_open || hosts_open || count_pending {
        tokio::select! {
            msg = links_rx.recv(), if links_open => match msg {
                Some(link) => links.push(link),
                None => links_open = false,
            },
            msg = hosts_rx.recv(), if hosts_open => match msg {
                Some(host) => hosts.push(host),
                None => hosts_open = false,
            },
            result = &mut count_rx, if count_pending => {
                count_pending = false;
                // A closed channel is the reader's "no value" completion.
                if let Ok(count) = result {
                    usage_count = count;
                }
            },
        }
    }

    tracing::debug!(
        "Rip finished: {} links, {} hosts, usage count {}",
        links.len(),
        hosts.len(),
        usage_count
    );

    RipOutcome {
        links,
        hosts,
        usage_count,
    }
}
