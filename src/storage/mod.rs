//! Storage module for the persistent usage counter
//!
//! The usage counter tracks how many scrapes the system has processed in
//! total. It lives outside any single scrape: concurrent invocations of the
//! pipeline increment it independently, and the store itself guarantees
//! atomic updates so no in-process locking is required by callers.

mod sqlite;
mod traits;

pub use sqlite::SqliteCounterStore;
pub use traits::{CounterStore, StorageError, StorageResult};

/// Fixed key under which the system-wide scrape counter is stored
pub const USAGE_KEY: &str = "system";
