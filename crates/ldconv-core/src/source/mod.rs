//! Entry sources feeding the extraction pass.
//!
//! A `DictionarySource` hands out a lazy, finite, one-shot sequence of
//! entries. Trimming and encoding options are applied here, upstream of the
//! writer layer.

mod jsonl;
pub mod markup;

pub use jsonl::{JsonlEntries, JsonlSource};

use crate::entry::DictionaryEntry;
use crate::error::Result;

/// Producer of dictionary entries for one run.
///
/// `entries` consumes the source, so a sequence can only be walked once.
pub trait DictionarySource {
    type Entries: Iterator<Item = Result<DictionaryEntry>>;

    fn entries(self) -> Self::Entries;
}

/// Options applied while reading entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// Strip markup tags from content
    pub trim: bool,
    /// Decode invalid UTF-8 lossily instead of skipping the line
    pub auto_encoding: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            trim: true,
            auto_encoding: false,
        }
    }
}

impl DictionarySource for Vec<DictionaryEntry> {
    type Entries = std::iter::Map<
        std::vec::IntoIter<DictionaryEntry>,
        fn(DictionaryEntry) -> Result<DictionaryEntry>,
    >;

    fn entries(self) -> Self::Entries {
        self.into_iter()
            .map(Ok as fn(DictionaryEntry) -> Result<DictionaryEntry>)
    }
}
