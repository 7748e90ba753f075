//! HTTP fetcher
//!
//! Builds the HTTP client and fetches the target page, handing its body
//! back as an open byte stream. The stream is consumed incrementally by the
//! extractor; the whole document is never buffered here.

use crate::config::FetcherConfig;
use crate::rip::ByteStream;
use crate::RipError;
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the target page and returns its body as an open byte stream
///
/// This is the one user-visible failure path: if the stream cannot be
/// obtained at all (network error, non-success status), the error is
/// surfaced to the caller. Once a stream exists, everything downstream
/// degrades silently instead of failing.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `target` - The validated absolute target URL
///
/// # Returns
///
/// * `Ok(ByteStream)` - Body stream positioned at the start of the response
/// * `Err(RipError)` - The page could not be retrieved
pub async fn fetch_target(client: &Client, target: &Url) -> Result<ByteStream, RipError> {
    let response = client
        .get(target.clone())
        .send()
        .await
        .map_err(|source| RipError::Fetch {
            url: target.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RipError::HttpStatus {
            url: target.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.bytes_stream().boxed())
}
