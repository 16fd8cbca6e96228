//! Shared SQLite store used by the unencrypted and encrypted backends.
//!
//! The store owns one connection for the lifetime of a run. The whole run is
//! a single transaction: `begin_batch` issues `BEGIN`, `end_batch` issues
//! `COMMIT`, and closing with the batch still active rolls it back.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::error::{ConvertError, Result};

use super::state::WriterState;

/// Schema of the single output table.
const CREATE_DICT_TABLE: &str = "CREATE TABLE IF NOT EXISTS dict (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT,
    content TEXT
);";

const INSERT_ENTRY: &str = "INSERT INTO dict (word, content) VALUES (?1, ?2)";

// Output is a derived artifact, so durability is traded for throughput.
const THROUGHPUT_PRAGMAS: &str = "PRAGMA synchronous = OFF; PRAGMA journal_mode = MEMORY;";

pub(crate) fn sqlite_error(context: &str, err: rusqlite::Error) -> ConvertError {
    ConvertError::Resource(format!("{}: {}", context, err))
}

/// Open (creating if absent) the SQLite file at `path`.
pub(crate) fn open_connection(path: &Path) -> Result<Connection> {
    Connection::open(path)
        .map_err(|e| sqlite_error(&format!("Cannot open store {}", path.display()), e))
}

/// An initialized connection plus its batch state.
pub(crate) struct RelationalStore {
    path: PathBuf,
    conn: Option<Connection>,
    state: WriterState,
}

impl RelationalStore {
    /// Create the schema and apply throughput pragmas on `conn`.
    ///
    /// On failure the connection is dropped, which closes it.
    pub(crate) fn initialize(path: &Path, conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_DICT_TABLE)
            .map_err(|e| sqlite_error("Schema creation failed", e))?;
        conn.execute_batch(THROUGHPUT_PRAGMAS)
            .map_err(|e| sqlite_error("Pragma setup failed", e))?;

        tracing::debug!(path = %path.display(), "Initialized dict store");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Some(conn),
            state: WriterState::Open,
        })
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| ConvertError::InvalidState("store is closed".to_string()))
    }

    pub(crate) fn begin_batch(&mut self) -> Result<()> {
        self.state.require(WriterState::Open, "begin_batch")?;
        self.conn()?
            .execute_batch("BEGIN TRANSACTION;")
            .map_err(|e| sqlite_error("Cannot begin transaction", e))?;
        self.state.begin()
    }

    pub(crate) fn end_batch(&mut self) -> Result<()> {
        self.state.require(WriterState::BatchActive, "end_batch")?;
        self.conn()?
            .execute_batch("COMMIT;")
            .map_err(|e| sqlite_error("Cannot commit transaction", e))?;
        self.state.end()
    }

    pub(crate) fn append(&mut self, word: &str, content: &str) -> Result<()> {
        self.state.require(WriterState::BatchActive, "append")?;
        let conn = self.conn()?;
        // &str binds pass the UTF-8 byte length to sqlite3_bind_text.
        let mut stmt = conn
            .prepare_cached(INSERT_ENTRY)
            .map_err(|e| ConvertError::row(word, e.to_string()))?;
        stmt.execute(params![word, content])
            .map_err(|e| ConvertError::row(word, e.to_string()))?;
        Ok(())
    }

    pub(crate) fn close(&mut self) -> Result<()> {
        let batch_active = self.state == WriterState::BatchActive;
        self.state = WriterState::Closed;
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        if batch_active {
            tracing::warn!(path = %self.path.display(), "Closing with an open batch; rolling back");
            if let Err(err) = conn.execute_batch("ROLLBACK;") {
                tracing::warn!(error = %err, "Rollback failed");
            }
        }

        conn.close()
            .map_err(|(_, e)| sqlite_error(&format!("Cannot close {}", self.path.display()), e))?;
        tracing::debug!(path = %self.path.display(), "Closed dict store");
        Ok(())
    }

    pub(crate) fn state(&self) -> WriterState {
        self.state
    }
}

impl Drop for RelationalStore {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "Store not closed cleanly");
        }
    }
}
