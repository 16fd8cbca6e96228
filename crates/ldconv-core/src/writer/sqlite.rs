//! Unencrypted SQLite writer backend.

use crate::config::OutputConfiguration;
use crate::error::Result;

use super::relational::{open_connection, RelationalStore};
use super::state::WriterState;
use super::traits::WriterBackend;

/// Writes entries into the `dict` table of a plain SQLite file.
pub struct SqliteBackend {
    store: RelationalStore,
}

impl WriterBackend for SqliteBackend {
    fn open(config: &OutputConfiguration) -> Result<Self> {
        let path = config.output_path();
        let conn = open_connection(path)?;
        let store = RelationalStore::initialize(path, conn)?;
        Ok(Self { store })
    }

    fn begin_batch(&mut self) -> Result<()> {
        self.store.begin_batch()
    }

    fn end_batch(&mut self) -> Result<()> {
        self.store.end_batch()
    }

    fn append(&mut self, word: &str, content: &str) -> Result<()> {
        self.store.append(word, content)
    }

    fn close(&mut self) -> Result<()> {
        self.store.close()
    }

    fn state(&self) -> WriterState {
        self.store.state()
    }
}
