//! SQLCipher-encrypted SQLite writer backend.
//!
//! Same schema and transaction strategy as the unencrypted backend. The key
//! and cipher are applied immediately after the connection opens, before any
//! schema or pragma statement. Any failure while keying aborts the run.

use rusqlite::{Connection, OptionalExtension};
use secrecy::{ExposeSecret, SecretString};

use crate::config::OutputConfiguration;
use crate::error::{ConvertError, Result};

use super::relational::{open_connection, sqlite_error, RelationalStore};
use super::state::WriterState;
use super::traits::WriterBackend;

/// Writes entries into the `dict` table of an encrypted SQLCipher file.
pub struct SqlcipherBackend {
    store: RelationalStore,
}

impl SqlcipherBackend {
    /// Apply key and cipher, then confirm the connection can read the store.
    fn apply_key(conn: &Connection, cipher_name: &str, key: &SecretString) -> Result<()> {
        conn.pragma_update(None, "key", key.expose_secret())
            .map_err(|e| sqlite_error("Cannot apply cipher key", e))?;
        conn.pragma_update(None, "cipher", cipher_name)
            .map_err(|e| sqlite_error("Cannot set cipher", e))?;

        let version: Option<String> = conn
            .query_row("PRAGMA cipher_version", [], |row| row.get(0))
            .optional()
            .map_err(|e| sqlite_error("Cannot query cipher version", e))?;
        let Some(version) = version else {
            return Err(ConvertError::Resource(
                "Linked SQLite library has no SQLCipher support".to_string(),
            ));
        };

        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| sqlite_error("Cipher key rejected by store", e))?;

        let active: Option<String> = conn
            .query_row("PRAGMA cipher", [], |row| row.get(0))
            .optional()
            .map_err(|e| sqlite_error("Cannot query active cipher", e))?;
        match active {
            Some(active) if !active.eq_ignore_ascii_case(cipher_name) => {
                tracing::warn!(
                    requested = cipher_name,
                    active = %active,
                    "Requested cipher is not available; store uses the active cipher"
                );
            }
            _ => {}
        }

        tracing::debug!(cipher_version = %version, "Applied SQLCipher key");
        Ok(())
    }
}

impl WriterBackend for SqlcipherBackend {
    fn open(config: &OutputConfiguration) -> Result<Self> {
        let (cipher_name, key) = config.cipher_credentials().ok_or_else(|| {
            ConvertError::Configuration("Need cipher name and key for sqlcipher format".to_string())
        })?;

        let path = config.output_path();
        let conn = open_connection(path)?;
        Self::apply_key(&conn, cipher_name, key)?;
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
