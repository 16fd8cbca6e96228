//! Writer lifecycle state machine.

use std::fmt;

use crate::error::{ConvertError, Result};

/// Lifecycle state of a writer backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Closed,
    Open,
    BatchActive,
}

impl WriterState {
    /// Fail with `InvalidState` unless the writer is in `expected`.
    pub(crate) fn require(self, expected: WriterState, operation: &str) -> Result<()> {
        if self == expected {
            Ok(())
        } else {
            Err(ConvertError::InvalidState(format!(
                "{} requires state {}, writer is {}",
                operation, expected, self
            )))
        }
    }

    /// `Open -> BatchActive`
    pub(crate) fn begin(&mut self) -> Result<()> {
        self.require(WriterState::Open, "begin_batch")?;
        *self = WriterState::BatchActive;
        Ok(())
    }

    /// `BatchActive -> Open`
    pub(crate) fn end(&mut self) -> Result<()> {
        self.require(WriterState::BatchActive, "end_batch")?;
        *self = WriterState::Open;
        Ok(())
    }
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterState::Closed => "closed",
            WriterState::Open => "open",
            WriterState::BatchActive => "batch-active",
        };
        f.write_str(name)
    }
}
