//! JSON Lines entry dump reader.
//!
//! Each non-blank line holds one `{"word": "...", "content": "..."}` object.
//! Malformed lines are logged and skipped; a failing read ends the sequence
//! with a `Source` error.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use serde::Deserialize;

use crate::entry::DictionaryEntry;
use crate::error::{ConvertError, Result};

use super::markup::strip_tags;
use super::{DictionarySource, SourceOptions};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Deserialize)]
struct RawEntry {
    word: String,
    content: String,
}

/// Entry dump read line by line from any buffered reader.
pub struct JsonlSource<R = BufReader<File>> {
    origin: String,
    reader: R,
    options: SourceOptions,
}

impl JsonlSource {
    /// Open the dump at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InputNotFound` if the file does not exist and
    /// `ConvertError::Source` if it cannot be opened.
    pub fn open(path: &Path, options: SourceOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConvertError::InputNotFound(path.to_path_buf()),
            _ => ConvertError::Source(format!("Cannot open {}: {}", path.display(), e)),
        })?;
        Ok(Self {
            origin: path.display().to_string(),
            reader: BufReader::new(file),
            options,
        })
    }
}

impl<R: BufRead> JsonlSource<R> {
    pub fn from_reader(reader: R, options: SourceOptions) -> Self {
        Self {
            origin: "<reader>".to_string(),
            reader,
            options,
        }
    }
}

impl<R: BufRead> DictionarySource for JsonlSource<R> {
    type Entries = JsonlEntries<R>;

    fn entries(self) -> Self::Entries {
        JsonlEntries {
            origin: self.origin,
            reader: self.reader,
            options: self.options,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }
}

/// Iterator over the entries of a `JsonlSource`.
pub struct JsonlEntries<R> {
    origin: String,
    reader: R,
    options: SourceOptions,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> Iterator for JsonlEntries<R> {
    type Item = Result<DictionaryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(ConvertError::Source(format!(
                        "{}: read failed after line {}: {}",
                        self.origin, self.line, e
                    ))));
                }
            }
            if self.done {
                break;
            }
            self.line += 1;

            let mut bytes = self.buf.as_slice();
            if self.line == 1 {
                bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            }
            while let Some((last, head)) = bytes.split_last() {
                if *last == b'\n' || *last == b'\r' {
                    bytes = head;
                } else {
                    break;
                }
            }
            if bytes.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let text = match std::str::from_utf8(bytes) {
                Ok(text) => Cow::Borrowed(text),
                Err(_) if self.options.auto_encoding => String::from_utf8_lossy(bytes),
                Err(e) => {
                    tracing::warn!(source = %self.origin, line = self.line, error = %e, "Skipping line with invalid UTF-8");
                    continue;
                }
            };

            let raw: RawEntry = match serde_json::from_str(&text) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(source = %self.origin, line = self.line, error = %e, "Skipping malformed entry");
                    continue;
                }
            };

            let content = if self.options.trim {
                strip_tags(&raw.content)
            } else {
                raw.content
            };
            return Some(Ok(DictionaryEntry {
                word: raw.word,
                content,
            }));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn read_all(input: &[u8], options: SourceOptions) -> Vec<Result<DictionaryEntry>> {
        JsonlSource::from_reader(Cursor::new(input.to_vec()), options)
            .entries()
            .collect()
    }

    fn untrimmed() -> SourceOptions {
        SourceOptions {
            trim: false,
            auto_encoding: false,
        }
    }

    #[test]
    fn test_reads_entries_in_order() {
        let input = b"{\"word\":\"hello\",\"content\":\"greeting\"}\n{\"word\":\"foo\",\"content\":\"bar\"}\n";
        let entries: Vec<DictionaryEntry> = read_all(input, untrimmed())
            .into_iter()
            .map(|entry| entry.unwrap())
            .collect();
        assert_eq!(
            entries,
            vec![
                DictionaryEntry::new("hello", "greeting"),
                DictionaryEntry::new("foo", "bar"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_crlf_and_bom_handled() {
        let input = b"\xEF\xBB\xBF{\"word\":\"a\",\"content\":\"1\"}\r\n\r\n   \n{\"word\":\"b\",\"content\":\"2\"}";
        let words: Vec<String> = read_all(input, untrimmed())
            .into_iter()
            .map(|entry| entry.unwrap().word)
            .collect();
        assert_eq!(words, vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let input = b"not json\n{\"word\":\"only-word\"}\n{\"word\":\"ok\",\"content\":\"fine\"}\n";
        let entries = read_all(input, untrimmed());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].as_ref().unwrap().word, "ok");
    }

    #[test]
    fn test_trim_strips_markup() {
        let input = b"{\"word\":\"hello\",\"content\":\"<b>greeting</b>\"}\n";
        let entries = read_all(input, SourceOptions::default());
        assert_eq!(entries[0].as_ref().unwrap().content, "greeting");

        let entries = read_all(input, untrimmed());
        assert_eq!(entries[0].as_ref().unwrap().content, "<b>greeting</b>");
    }

    #[test]
    fn test_invalid_utf8_skipped_without_auto_encoding() {
        let input = b"{\"word\":\"caf\xE9\",\"content\":\"x\"}\n{\"word\":\"ok\",\"content\":\"y\"}\n";
        let entries = read_all(input, untrimmed());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].as_ref().unwrap().word, "ok");
    }

    #[test]
    fn test_invalid_utf8_decoded_lossily_with_auto_encoding() {
        let input = b"{\"word\":\"caf\xE9\",\"content\":\"x\"}\n";
        let options = SourceOptions {
            trim: false,
            auto_encoding: true,
        };
        let entries = read_all(input, options);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].as_ref().unwrap().word, "caf\u{FFFD}");
    }

    #[test]
    fn test_open_missing_file_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonlSource::open(&dir.path().join("missing.jsonl"), SourceOptions::default());
        assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_read_failure_ends_with_source_error() {
        let source = JsonlSource::from_reader(BufReader::new(FailingReader), untrimmed());
        let mut entries = source.entries();
        assert!(matches!(entries.next(), Some(Err(ConvertError::Source(_)))));
        assert!(entries.next().is_none());
    }
}
