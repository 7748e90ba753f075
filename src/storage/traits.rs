//! Storage traits and error types

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for usage-counter store backends
///
/// The counter is cosmetic: callers are expected to absorb every error from
/// these methods rather than fail a scrape over them. Implementations must
/// support concurrent increments from many simultaneous scrapes without
/// lost updates.
///
/// The store is handed to the orchestrator as an explicit capability rather
/// than ambient global state, so tests can substitute their own backends.
pub trait CounterStore: Send + Sync {
    /// Atomically increments the counter stored under `key`, creating the
    /// record if it does not exist yet
    ///
    /// # Returns
    ///
    /// The counter value after the increment
    fn increment(&self, key: &str) -> StorageResult<u64>;

    /// Reads the counter stored under `key`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(count))` - The current stored value
    /// * `Ok(None)` - No record exists for this key yet
    fn read(&self, key: &str) -> StorageResult<Option<u64>>;
}
