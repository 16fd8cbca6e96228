//! Output configuration shared by all writer backends.
//!
//! An `OutputConfiguration` is built once from external input and is
//! read-only thereafter. `validate` enforces the credential invariant for the
//! encrypted format before any backend is constructed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ConvertError, Result};

/// Output technology selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `word = content` lines
    PlainText,
    /// Unencrypted SQLite store
    Sqlite,
    /// SQLCipher-encrypted SQLite store
    Sqlcipher,
}

impl OutputFormat {
    /// Name accepted on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::PlainText => "plaintext",
            OutputFormat::Sqlite => "sqlite",
            OutputFormat::Sqlcipher => "sqlcipher",
        }
    }

    pub fn is_relational(&self) -> bool {
        !matches!(self, OutputFormat::PlainText)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plaintext" => Ok(OutputFormat::PlainText),
            "sqlite" => Ok(OutputFormat::Sqlite),
            "sqlcipher" => Ok(OutputFormat::Sqlcipher),
            other => Err(ConvertError::Configuration(format!(
                "Unsupported output format: {} (use plaintext, sqlite or sqlcipher)",
                other
            ))),
        }
    }
}

/// Everything a backend needs to open its output.
pub struct OutputConfiguration {
    format: OutputFormat,
    output_path: PathBuf,
    cipher_name: Option<String>,
    cipher_key: Option<SecretString>,
    compressed: bool,
}

impl OutputConfiguration {
    pub fn new(format: OutputFormat, output_path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            output_path: output_path.into(),
            cipher_name: None,
            cipher_key: None,
            compressed: false,
        }
    }

    /// Set the cipher algorithm name (only used by the encrypted format).
    pub fn cipher_name(mut self, name: impl Into<String>) -> Self {
        self.cipher_name = Some(name.into());
        self
    }

    /// Set the cipher key (only used by the encrypted format).
    pub fn cipher_key(mut self, key: SecretString) -> Self {
        self.cipher_key = Some(key);
        self
    }

    /// Gzip the plaintext output.
    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Cipher name and key, if both are present and non-empty.
    pub fn cipher_credentials(&self) -> Option<(&str, &SecretString)> {
        let name = self.cipher_name.as_deref().map(str::trim)?;
        let key = self.cipher_key.as_ref()?;
        if name.is_empty() || key.expose_secret().is_empty() {
            return None;
        }
        Some((name, key))
    }

    /// Reject configurations that no backend can honour.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Configuration` if:
    /// - The output path is empty
    /// - The encrypted format lacks a cipher name or key
    pub fn validate(&self) -> Result<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ConvertError::Configuration(
                "Output path is empty".to_string(),
            ));
        }

        if self.format == OutputFormat::Sqlcipher && self.cipher_credentials().is_none() {
            return Err(ConvertError::Configuration(
                "Need cipher name and key for sqlcipher format".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for OutputConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputConfiguration")
            .field("format", &self.format)
            .field("output_path", &self.output_path)
            .field("cipher_name", &self.cipher_name)
            .field(
                "cipher_key",
                &self.cipher_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("compressed", &self.compressed)
            .finish()
    }
}
