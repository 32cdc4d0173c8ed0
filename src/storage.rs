//! Local persistence for vessel report history.
//!
//! Every vessel's reports live in one `SQLite` database under the storage root:
//!
//! ```text
//! <root>/
//!   noon.sqlite    # reports table, one row per noon report
//! ```
//!
//! The checks never touch storage. Callers load a vessel's history through
//! [`HistoryStore`], evaluate against the snapshot, and upsert what was
//! accepted.

mod history;
#[cfg(test)]
mod memory;

use std::{fs, io, path::PathBuf, time::Duration};

use rusqlite::Connection;
use serde::Serialize;

use crate::model::ReportRecord;

#[cfg(test)]
pub use memory::MemoryStore;

const DATABASE: &str = "noon.sqlite";

/// How long a writer waits for another process holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS reports (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    vessel_id     TEXT NOT NULL,
    occurred_on   TEXT NOT NULL,
    cargo_status  TEXT NOT NULL,
    report_type   TEXT NOT NULL,
    UNIQUE (vessel_id, occurred_on, report_type)
);
CREATE INDEX IF NOT EXISTS reports_by_vessel ON reports (vessel_id, occurred_on, id);
";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt storage: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Whether an upsert added a report or replaced one already on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Upserted {
    Inserted,
    Updated,
}

/// One vessel's footprint in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselSummary {
    pub vessel_id: String,
    pub reports: usize,

    /// The vessel's most recent report.
    pub latest: ReportRecord,
}

/// Where vessel histories come from and where accepted reports go.
///
/// A report is keyed by vessel, date, and report type: upserting a report
/// with the same key replaces its cargo status, anything else is appended.
pub trait HistoryStore {
    /// A vessel's reports, ordered by date and then by insertion.
    /// Unknown vessels have an empty history.
    fn history(&self, vessel_id: &str) -> Result<Vec<ReportRecord>>;

    /// Records an accepted report.
    fn upsert(&self, record: &ReportRecord) -> Result<Upserted>;

    /// Every vessel with at least one report, by name.
    fn vessels(&self) -> Result<Vec<VesselSummary>>;
}

/// `SQLite`-backed history store.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory and database schema are created if they don't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let storage = Self { root };
        storage.open_db()?.execute_batch(SCHEMA)?;
        Ok(storage)
    }

    /// Returns the default storage root: `~/.noon/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".noon"))
    }

    /// Opens a connection to the report database.
    fn open_db(&self) -> Result<Connection> {
        let conn = Connection::open(self.root.join(DATABASE))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}
