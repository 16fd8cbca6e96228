//! Plain text writer backend.
//!
//! Each entry becomes one UTF-8 line: `word = content\n`. Embedded newlines in
//! either field are written as-is. With compression enabled the same bytes
//! are gzip-encoded.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::config::OutputConfiguration;
use crate::error::{ConvertError, Result};

use super::state::WriterState;
use super::traits::WriterBackend;

/// Separator between word and content on each line.
pub const SEPARATOR: &str = " = ";

enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Sink {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Sink::Plain(writer) => writer as &mut dyn Write,
            Sink::Gzip(encoder) => encoder as &mut dyn Write,
        }
    }

    fn finish(self) -> std::io::Result<()> {
        let mut inner = match self {
            Sink::Plain(writer) => writer,
            Sink::Gzip(encoder) => encoder.finish()?,
        };
        inner.flush()?;
        inner.get_ref().sync_all()
    }
}

/// Line-oriented text output.
pub struct PlainTextBackend {
    path: PathBuf,
    sink: Option<Sink>,
    state: WriterState,
}

impl WriterBackend for PlainTextBackend {
    fn open(config: &OutputConfiguration) -> Result<Self> {
        let path = config.output_path().to_path_buf();
        let file = File::create(&path).map_err(|e| {
            ConvertError::Resource(format!(
                "Cannot open {} for writing: {}",
                path.display(),
                e
            ))
        })?;
        let writer = BufWriter::new(file);
        let sink = if config.is_compressed() {
            Sink::Gzip(GzEncoder::new(writer, Compression::default()))
        } else {
            Sink::Plain(writer)
        };

        tracing::debug!(path = %path.display(), compressed = config.is_compressed(), "Opened plaintext output");
        Ok(Self {
            path,
            sink: Some(sink),
            state: WriterState::Open,
        })
    }

    fn begin_batch(&mut self) -> Result<()> {
        self.state.begin()
    }

    fn end_batch(&mut self) -> Result<()> {
        self.state.end()
    }

    fn append(&mut self, word: &str, content: &str) -> Result<()> {
        self.state.require(WriterState::BatchActive, "append")?;
        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| ConvertError::InvalidState("plaintext output is closed".to_string()))?;

        // A failed stream write leaves the file in an unknown state, so it is fatal.
        let out = sink.writer();
        out.write_all(word.as_bytes())?;
        out.write_all(SEPARATOR.as_bytes())?;
        out.write_all(content.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state = WriterState::Closed;
        let Some(sink) = self.sink.take() else {
            return Ok(());
        };
        // Buffered lines only reach the file here, so failures are write failures.
        if let Err(source) = sink.finish() {
            tracing::warn!(path = %self.path.display(), error = %source, "Failed to flush plaintext output");
            return Err(ConvertError::Io { source });
        }
        tracing::debug!(path = %self.path.display(), "Closed plaintext output");
        Ok(())
    }

    fn state(&self) -> WriterState {
        self.state
    }
}

impl Drop for PlainTextBackend {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "Plaintext output not closed cleanly");
        }
    }
}
