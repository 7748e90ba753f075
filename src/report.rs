//! Scrape report assembly and JSON shaping
//!
//! Field names match the original service's wire format: `links`,
//! `hostnames`, `ripcount`.

use crate::rip::{tally_hosts, RipOutcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The finished report for one scraped page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Every link found on the page, in discovery order
    pub links: Vec<String>,

    /// Occurrence count per distinct hostname
    #[serde(rename = "hostnames")]
    pub hosts: HashMap<String, u64>,

    /// Total scrapes the system has processed, best-effort
    #[serde(rename = "ripcount")]
    pub rip_count: u64,
}

impl From<RipOutcome> for ScrapeReport {
    fn from(outcome: RipOutcome) -> Self {
        Self {
            links: outcome.links,
            hosts: tally_hosts(outcome.hosts),
            rip_count: outcome.usage_count,
        }
    }
}
