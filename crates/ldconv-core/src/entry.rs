//! Dictionary entry produced by a source and consumed by a writer.

/// One `(word, content)` pair.
///
/// Both fields are arbitrary UTF-8; `content` may carry markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: String,
    pub content: String,
}

impl DictionaryEntry {
    pub fn new(word: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            content: content.into(),
        }
    }
}
