//! Writer backend trait definition.
//!
//! The `WriterBackend` trait defines the interface that all output backends
//! must implement. This abstraction allows ldconv to write plain text, SQLite
//! and SQLCipher output without changing the extraction loop.

use crate::config::OutputConfiguration;
use crate::error::Result;

use super::state::WriterState;

/// Output backend interface for persisting dictionary entries.
///
/// All implementations must ensure:
/// - Exactly one underlying resource is owned per instance
/// - `append` is only accepted while a batch is active
/// - `close` is idempotent and releases the resource on every path
///
/// Lifecycle: `Closed -> Open -> BatchActive -> Open -> Closed`.
pub trait WriterBackend {
    /// Open the output described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Configuration` if required credentials are
    /// absent for the backend, or `ConvertError::Resource` if:
    /// - The output file or store cannot be created or opened
    /// - Key application or schema creation fails
    fn open(config: &OutputConfiguration) -> Result<Self>
    where
        Self: Sized;

    /// Start the bulk-load batch.
    ///
    /// Backends without transactional semantics treat this as a state
    /// transition only.
    fn begin_batch(&mut self) -> Result<()>;

    /// Finish the bulk-load batch, committing everything appended since
    /// `begin_batch`.
    fn end_batch(&mut self) -> Result<()>;

    /// Persist one entry.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Row` if this entry alone could not be stored,
    /// `ConvertError::InvalidState` if no batch is active, or a fatal error
    /// if the output itself is broken.
    fn append(&mut self, word: &str, content: &str) -> Result<()>;

    /// Flush buffered state and release the underlying resource.
    ///
    /// Calling this on an already closed backend is a no-op. Closing while a
    /// batch is active discards the uncommitted batch where the backend can.
    fn close(&mut self) -> Result<()>;

    /// Current lifecycle state.
    fn state(&self) -> WriterState;
}
