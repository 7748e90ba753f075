//! Scrape pipeline module
//!
//! This module contains the concurrent scrape pipeline:
//! - Streaming HTML tokenization and link/host extraction
//! - Best-effort usage counter lookup
//! - Fan-in orchestration of both producers
//! - Hostname frequency tallying

mod counter;
mod extractor;
mod orchestrator;
mod tally;

pub use counter::read_usage_count;
pub use extractor::extract_links;
pub use orchestrator::{rip, RipOutcome};
pub use tally::tally_hosts;

use bytes::Bytes;
use futures::stream::BoxStream;

/// An open byte stream positioned at the start of an HTTP response body
///
/// The pipeline takes exclusive ownership of the stream for the duration of
/// one scrape and drains or drops it by completion.
pub type ByteStream = BoxStream<'static, reqwest::Result<Bytes>>;

/// Buffer size for the link and host channels
///
/// The channels are deliberately buffered: producer completion is signaled
/// by sender drop, and a buffered channel lets a producer finish draining
/// without requiring the consumer's live participation on every send.
pub(crate) const CHANNEL_CAPACITY: usize = 64;
