//! SQLite usage-counter store implementation

use crate::storage::traits::{CounterStore, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed counter store
///
/// The connection sits behind a mutex so a single handle can serve
/// concurrent tasks; the increment itself is a single atomic upsert, so
/// competing scrapes never lose updates.
pub struct SqliteCounterStore {
    conn: Mutex<Connection>,
}

impl SqliteCounterStore {
    /// Opens (or creates) the counter database at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteCounterStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory store, useful for tests
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS usage_counts (
            key TEXT PRIMARY KEY,
            count INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        );
    ",
    )?;
    Ok(())
}

impl CounterStore for SqliteCounterStore {
    fn increment(&self, key: &str) -> StorageResult<u64> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().unwrap();

        let count = conn.query_row(
            "INSERT INTO usage_counts (key, count, updated_at) VALUES (?1, 1, ?2)
             ON CONFLICT(key) DO UPDATE SET count = count + 1, updated_at = ?2
             RETURNING count",
            params![key, now],
            |row| row.get::<_, i64>(0),
        )?;

        Ok(count as u64)
    }

    fn read(&self, key: &str) -> StorageResult<Option<u64>> {
        let conn = self.conn.lock().unwrap();

        let count = conn
            .query_row(
                "SELECT count FROM usage_counts WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        Ok(count.map(|c| c as u64))
    }
}
