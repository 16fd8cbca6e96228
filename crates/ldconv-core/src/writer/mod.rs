//! Writer backends for extracted dictionary entries.
//!
//! The concrete backend is chosen once from `OutputFormat` and wrapped in the
//! `Backend` enum; the extraction loop only ever talks to `WriterBackend`.

pub mod plaintext;
mod relational;
pub mod sqlcipher;
pub mod sqlite;
mod state;
mod traits;

pub use plaintext::PlainTextBackend;
pub use sqlcipher::SqlcipherBackend;
pub use sqlite::SqliteBackend;
pub use state::WriterState;
pub use traits::WriterBackend;

use crate::config::{OutputConfiguration, OutputFormat};
use crate::error::Result;

/// The backend selected for one run.
pub enum Backend {
    PlainText(PlainTextBackend),
    Sqlite(SqliteBackend),
    Sqlcipher(SqlcipherBackend),
}

impl Backend {
    fn inner(&mut self) -> &mut dyn WriterBackend {
        match self {
            Backend::PlainText(backend) => backend as &mut dyn WriterBackend,
            Backend::Sqlite(backend) => backend as &mut dyn WriterBackend,
            Backend::Sqlcipher(backend) => backend as &mut dyn WriterBackend,
        }
    }

    /// Format this backend writes.
    pub fn format(&self) -> OutputFormat {
        match self {
            Backend::PlainText(_) => OutputFormat::PlainText,
            Backend::Sqlite(_) => OutputFormat::Sqlite,
            Backend::Sqlcipher(_) => OutputFormat::Sqlcipher,
        }
    }
}

impl WriterBackend for Backend {
    fn open(config: &OutputConfiguration) -> Result<Self> {
        if config.is_compressed() && config.format().is_relational() {
            tracing::warn!(format = %config.format(), "Compression only applies to plaintext output; ignoring");
        }

        Ok(match config.format() {
            OutputFormat::PlainText => Backend::PlainText(PlainTextBackend::open(config)?),
            OutputFormat::Sqlite => Backend::Sqlite(SqliteBackend::open(config)?),
            OutputFormat::Sqlcipher => Backend::Sqlcipher(SqlcipherBackend::open(config)?),
        })
    }

    fn begin_batch(&mut self) -> Result<()> {
        self.inner().begin_batch()
    }

    fn end_batch(&mut self) -> Result<()> {
        self.inner().end_batch()
    }

    fn append(&mut self, word: &str, content: &str) -> Result<()> {
        self.inner().append(word, content)
    }

    fn close(&mut self) -> Result<()> {
        self.inner().close()
    }

    fn state(&self) -> WriterState {
        match self {
            Backend::PlainText(backend) => backend.state(),
            Backend::Sqlite(backend) => backend.state(),
            Backend::Sqlcipher(backend) => backend.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use tempfile::tempdir;

    #[test]
    fn test_open_selects_backend_by_format() {
        let dir = tempdir().unwrap();

        let plain = OutputConfiguration::new(OutputFormat::PlainText, dir.path().join("a.txt"));
        let sqlite = OutputConfiguration::new(OutputFormat::Sqlite, dir.path().join("b.db"));
        let cipher = OutputConfiguration::new(OutputFormat::Sqlcipher, dir.path().join("c.db"))
            .cipher_name("aes-256-cbc")
            .cipher_key(SecretString::from("secret".to_string()));

        for config in [plain, sqlite, cipher] {
            let mut backend = Backend::open(&config).unwrap();
            assert_eq!(backend.format(), config.format());
            assert_eq!(backend.state(), WriterState::Open);
            backend.close().unwrap();
            assert_eq!(backend.state(), WriterState::Closed);
        }
    }
}
