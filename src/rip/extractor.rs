//! Link/host extractor
//!
//! Consumes the page body as a stream of byte chunks, tokenizes it
//! incrementally, and emits two value streams back to the orchestrator:
//! every hyperlink found in an anchor's `href` attribute (rewritten to an
//! absolute form when relative), and the hostname each link points to.
//!
//! The document is never materialized in memory. A tokenizer failure is not
//! an error: extraction silently truncates at the point of failure and
//! whatever was found so far stands as the result.

use crate::rip::{ByteStream, CHANNEL_CAPACITY};
use bytes::Bytes;
use futures::StreamExt;
use lol_html::{element, HtmlRewriter, Settings};
use tokio::sync::mpsc;
use url::Url;

/// What to do with a single raw href value
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HrefOutcome {
    /// Root/fragment/empty references are excluded entirely
    Skip,
    /// Report the link, and the hostname when one could be determined
    Emit {
        host: Option<String>,
        link: String,
    },
}

/// Classifies a raw href value against the scrape target
///
/// Rules, in order:
/// 1. `""`, `/` and `#` are skipped outright.
/// 2. An absolute reference reports its own host and is passed through
///    unchanged.
/// 3. A relative reference reports an empty hostname (the hostname is taken
///    from the reference before resolution, matching the original system's
///    behavior) and is rewritten onto the target URL.
/// 4. An unparsable reference reports no hostname but is still passed
///    through as a link, unresolved.
pub(crate) fn classify_href(raw: &str, target: &Url) -> HrefOutcome {
    if raw.is_empty() || raw == "/" || raw == "#" {
        return HrefOutcome::Skip;
    }

    match Url::parse(raw) {
        Ok(parsed) => HrefOutcome::Emit {
            host: Some(parsed.host_str().unwrap_or("").to_string()),
            link: raw.to_string(),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let link = match target.join(raw) {
                Ok(resolved) => resolved.to_string(),
                Err(e) => {
                    tracing::debug!("Could not resolve {} against target: {}", raw, e);
                    raw.to_string()
                }
            };
            HrefOutcome::Emit {
                host: Some(String::new()),
                link,
            }
        }
        Err(e) => {
            tracing::debug!("Unparsable href {}: {}", raw, e);
            HrefOutcome::Emit {
                host: None,
                link: raw.to_string(),
            }
        }
    }
}

/// Extracts links and hostnames from an HTML byte stream
///
/// Runs until the stream ends or the tokenizer fails, sending each
/// discovered hostname and link through the given channels in discovery
/// order. Completion is signaled by dropping the senders.
///
/// The tokenizer is not `Send`, so it lives on a blocking thread and is fed
/// chunks over an internal channel; this task only pumps bytes.
///
/// # Arguments
///
/// * `target` - The scrape target, used as the base for resolving relative
///   links
/// * `body` - The open byte stream of the page body; owned and released by
///   this function
/// * `links_tx` - Channel for resolved links
/// * `hosts_tx` - Channel for hostnames
pub async fn extract_links(
    target: Url,
    mut body: ByteStream,
    links_tx: mpsc::Sender<String>,
    hosts_tx: mpsc::Sender<String>,
) {
    let (chunk_tx, chunk_rx) = mpsc::channel::<Bytes>(CHANNEL_CAPACITY);
    let scanner =
        tokio::task::spawn_blocking(move || scan_chunks(target, chunk_rx, links_tx, hosts_tx));

    while let Some(next) = body.next().await {
        match next {
            Ok(chunk) => {
                // A closed chunk channel means the scanner hit a tokenizer
                // error and bailed; stop reading.
                if chunk_tx.send(chunk).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::debug!("Body stream ended early: {}", e);
                break;
            }
        }
    }

    // Release the byte stream and let the scanner see end-of-document.
    drop(body);
    drop(chunk_tx);

    if scanner.await.is_err() {
        tracing::debug!("Scanner task panicked");
    }
}

/// Feeds chunks through the streaming tokenizer, emitting links and hosts
/// from every anchor tag carrying an href attribute
fn scan_chunks(
    target: Url,
    mut chunks: mpsc::Receiver<Bytes>,
    links_tx: mpsc::Sender<String>,
    hosts_tx: mpsc::Sender<String>,
) {
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("a[href]", move |el| {
                if let Some(raw) = el.get_attribute("href") {
                    if let HrefOutcome::Emit { host, link } = classify_href(&raw, &target) {
                        // Hostname first, then the link, as two independent
                        // sends; ordering across the two channels is not
                        // guaranteed to the consumer.
                        if let Some(host) = host {
                            if hosts_tx.blocking_send(host).is_err() {
                                return Err("host channel closed".into());
                            }
                        }
                        if links_tx.blocking_send(link).is_err() {
                            return Err("link channel closed".into());
                        }
                    }
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );

    while let Some(chunk) = chunks.blocking_recv() {
        if let Err(e) = rewriter.write(&chunk) {
            tracing::debug!("Tokenizer error, truncating extraction: {}", e);
            return;
        }
    }

    if let Err(e) = rewriter.end() {
        tracing::debug!("Tokenizer error at end of document: {}", e);
    }
}
