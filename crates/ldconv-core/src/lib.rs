//! # ldconv Core
//!
//! Core library for ldconv - extracts dictionary entries and persists them
//! as plain text, SQLite, or SQLCipher output.
//!
//! This crate provides the writer backends, the extraction orchestrator and
//! the entry sources, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **writer**: `WriterBackend` trait and the three output backends
//! - **source**: `DictionarySource` trait and the JSON Lines entry dump reader
//! - **extract**: validation, backend selection and the single extraction pass
//! - **config**: output configuration shared by all backends

pub mod config;
pub mod entry;
pub mod error;
pub mod extract;
pub mod source;
pub mod writer;

pub use config::{OutputConfiguration, OutputFormat};
pub use entry::DictionaryEntry;
pub use error::{ConvertError, Result};
pub use extract::{drive, ExtractionReport, Orchestrator, SkippedEntry};
pub use source::{DictionarySource, JsonlSource, SourceOptions};
pub use writer::{Backend, WriterBackend, WriterState};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
