//! Extraction orchestration.
//!
//! `Orchestrator::new` validates the configuration and input before any
//! backend exists. `Orchestrator::run` opens the selected backend and drives a
//! single batch over the source. `drive` holds the loop itself and is generic
//! over the writer so it can run against any `WriterBackend`.

use std::path::Path;

use crate::config::OutputConfiguration;
use crate::error::{ConvertError, Result};
use crate::source::DictionarySource;
use crate::writer::{Backend, WriterBackend};

/// An entry that failed to persist and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub word: String,
    pub reason: String,
}

/// Outcome of a completed extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Entries produced by the source
    pub read: usize,
    /// Entries persisted by the backend
    pub written: usize,
    /// Entries rejected with a row error
    pub skipped: Vec<SkippedEntry>,
}

impl ExtractionReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Validated extraction request.
#[derive(Debug)]
pub struct Orchestrator<'a> {
    config: &'a OutputConfiguration,
}

impl<'a> Orchestrator<'a> {
    /// Validate `config` and check that `input` exists.
    ///
    /// Nothing is created on disk.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InputNotFound` if `input` does not exist and
    /// `ConvertError::Configuration` if `config` is invalid.
    pub fn new(config: &'a OutputConfiguration, input: &Path) -> Result<Self> {
        if !input.exists() {
            return Err(ConvertError::InputNotFound(input.to_path_buf()));
        }
        config.validate()?;
        Ok(Self { config })
    }

    /// Open the configured backend and extract every entry from `source`.
    pub fn run<S: DictionarySource>(&self, source: S) -> Result<ExtractionReport> {
        let mut backend = Backend::open(self.config)?;
        tracing::info!(
            format = %backend.format(),
            output = %self.config.output_path().display(),
            "Extracting entries"
        );
        let report = drive(&mut backend, source)?;
        tracing::info!(
            read = report.read,
            written = report.written,
            skipped = report.skipped.len(),
            "Extraction finished"
        );
        Ok(report)
    }
}

/// Run one batch over `source` and close `writer`.
///
/// Row errors are collected in the report. The first fatal error stops the
/// loop, skips `end_batch` and is returned after `writer` has been closed.
/// `writer` is closed on every path.
pub fn drive<W, S>(writer: &mut W, source: S) -> Result<ExtractionReport>
where
    W: WriterBackend + ?Sized,
    S: DictionarySource,
{
    let outcome = pump(writer, source);
    let closed = writer.close();

    match outcome {
        Ok(report) => {
            closed?;
            Ok(report)
        }
        Err(err) => {
            if let Err(close_err) = closed {
                tracing::warn!(error = %close_err, "Close failed after aborted run");
            }
            Err(err)
        }
    }
}

fn pump<W, S>(writer: &mut W, source: S) -> Result<ExtractionReport>
where
    W: WriterBackend + ?Sized,
    S: DictionarySource,
{
    writer.begin_batch()?;

    let mut report = ExtractionReport::default();
    for entry in source.entries() {
        let entry = entry?;
        report.read += 1;
        match writer.append(&entry.word, &entry.content) {
            Ok(()) => report.written += 1,
            Err(err) if !err.is_fatal() => {
                tracing::warn!(error = %err, "Skipping entry");
                report.skipped.push(SkippedEntry {
                    word: entry.word,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    writer.end_batch()?;
    Ok(report)
}
