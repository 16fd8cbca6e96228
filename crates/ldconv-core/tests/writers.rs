use std::fs;
use std::path::Path;

use ldconv_core::writer::{Backend, WriterBackend, WriterState};
use ldconv_core::{drive, DictionaryEntry, OutputConfiguration, OutputFormat};
use rusqlite::Connection;
use secrecy::SecretString;
use tempfile::tempdir;

const KEY: &str = "test-key-secure-123";
const CIPHER: &str = "aes-256-cbc";

fn config_for(format: OutputFormat, path: &Path) -> OutputConfiguration {
    let config = OutputConfiguration::new(format, path);
    match format {
        OutputFormat::Sqlcipher => config
            .cipher_name(CIPHER)
            .cipher_key(SecretString::from(KEY.to_string())),
        _ => config,
    }
}

fn sample_entries() -> Vec<DictionaryEntry> {
    vec![
        DictionaryEntry::new("hello", "greeting"),
        DictionaryEntry::new("foo", "bar"),
        DictionaryEntry::new("quote's", "it's \"quoted\", with; delimiters = and more"),
        DictionaryEntry::new("辞書", "<b>じしょ</b> 🙂"),
    ]
}

fn extract(format: OutputFormat, path: &Path, entries: Vec<DictionaryEntry>) {
    let config = config_for(format, path);
    let mut backend = Backend::open(&config).expect("open should succeed");
    let report = drive(&mut backend, entries).expect("extraction should succeed");
    assert!(report.is_complete());
    assert_eq!(backend.state(), WriterState::Closed);
}

fn read_rows(path: &Path, key: Option<&str>) -> Vec<(i64, String, String)> {
    let conn = Connection::open(path).expect("open should succeed");
    if let Some(key) = key {
        conn.pragma_update(None, "key", key).expect("key should apply");
    }
    let mut stmt = conn
        .prepare("SELECT id, word, content FROM dict ORDER BY id")
        .expect("prepare should succeed");
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .expect("query should succeed")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows should decode");
    rows
}

fn key_for(format: OutputFormat) -> Option<&'static str> {
    match format {
        OutputFormat::Sqlcipher => Some(KEY),
        _ => None,
    }
}

#[test]
fn test_plaintext_scenario_exact_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");

    extract(
        OutputFormat::PlainText,
        &path,
        vec![
            DictionaryEntry::new("hello", "greeting"),
            DictionaryEntry::new("foo", "bar"),
        ],
    );

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello = greeting\nfoo = bar\n");
}

#[test]
fn test_relational_scenario_ids_and_order() {
    for format in [OutputFormat::Sqlite, OutputFormat::Sqlcipher] {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.db");

        extract(
            format,
            &path,
            vec![
                DictionaryEntry::new("hello", "greeting"),
                DictionaryEntry::new("foo", "bar"),
            ],
        );

        assert_eq!(
            read_rows(&path, key_for(format)),
            vec![
                (1, "hello".to_string(), "greeting".to_string()),
                (2, "foo".to_string(), "bar".to_string()),
            ],
            "format {}",
            format
        );
    }
}

#[test]
fn test_persisted_count_matches_source_count() {
    let entries: Vec<DictionaryEntry> = (0..250)
        .map(|i| DictionaryEntry::new(format!("word{}", i), format!("content {}", i)))
        .collect();

    let dir = tempdir().unwrap();
    let text = dir.path().join("out.txt");
    extract(OutputFormat::PlainText, &text, entries.clone());
    assert_eq!(fs::read_to_string(&text).unwrap().lines().count(), entries.len());

    for format in [OutputFormat::Sqlite, OutputFormat::Sqlcipher] {
        let path = dir.path().join(format!("{}.db", format));
        extract(format, &path, entries.clone());
        assert_eq!(read_rows(&path, key_for(format)).len(), entries.len());
    }
}

#[test]
fn test_plaintext_splits_back_into_pairs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let entries = sample_entries();
    extract(OutputFormat::PlainText, &path, entries.clone());

    let text = fs::read_to_string(&path).unwrap();
    let parsed: Vec<DictionaryEntry> = text
        .lines()
        .map(|line| {
            let (word, content) = line.split_once(" = ").expect("separator present");
            DictionaryEntry::new(word, content)
        })
        .collect();
    assert_eq!(parsed, entries);
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempdir().unwrap();

    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    extract(OutputFormat::PlainText, &first, sample_entries());
    extract(OutputFormat::PlainText, &second, sample_entries());
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    for format in [OutputFormat::Sqlite, OutputFormat::Sqlcipher] {
        let first = dir.path().join(format!("first.{}", format));
        let second = dir.path().join(format!("second.{}", format));
        extract(format, &first, sample_entries());
        extract(format, &second, sample_entries());

        let strip_ids = |rows: Vec<(i64, String, String)>| -> Vec<(String, String)> {
            rows.into_iter().map(|(_, w, c)| (w, c)).collect()
        };
        assert_eq!(
            strip_ids(read_rows(&first, key_for(format))),
            strip_ids(read_rows(&second, key_for(format)))
        );
    }
}

#[test]
fn test_relational_preserves_delimiters_and_multibyte() {
    for format in [OutputFormat::Sqlite, OutputFormat::Sqlcipher] {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.db");
        extract(format, &path, sample_entries());

        let stored: Vec<DictionaryEntry> = read_rows(&path, key_for(format))
            .into_iter()
            .map(|(_, word, content)| DictionaryEntry::new(word, content))
            .collect();
        assert_eq!(stored, sample_entries());
    }
}

#[test]
fn test_encrypted_store_is_unreadable_with_wrong_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dict.db");
    extract(OutputFormat::Sqlcipher, &path, sample_entries());

    let conn = Connection::open(&path).unwrap();
    conn.pragma_update(None, "key", "wrong-key").unwrap();
    let result: rusqlite::Result<i64> =
        conn.query_row("SELECT count(*) FROM dict", [], |row| row.get(0));
    assert!(result.is_err());

    let raw = fs::read(&path).unwrap();
    assert!(!raw.starts_with(b"SQLite format 3"));
}

#[test]
fn test_unencrypted_store_is_plain_sqlite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dict.db");
    extract(OutputFormat::Sqlite, &path, sample_entries());

    let raw = fs::read(&path).unwrap();
    assert!(raw.starts_with(b"SQLite format 3"));
}

#[test]
fn test_close_twice_never_faults() {
    let dir = tempdir().unwrap();
    for format in [OutputFormat::PlainText, OutputFormat::Sqlite, OutputFormat::Sqlcipher] {
        let path = dir.path().join(format!("twice.{}", format));
        let mut backend = Backend::open(&config_for(format, &path)).unwrap();
        backend.begin_batch().unwrap();
        backend.append("hello", "greeting").unwrap();
        backend.end_batch().unwrap();
        backend.close().unwrap();
        backend.close().unwrap();
    }
}
