use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use ldconv_core::VERSION;

/// ldconv - Dictionary entry extractor/converter (plaintext, sqlite, sqlcipher)
#[derive(Parser)]
#[command(name = "ldconv")]
#[command(author, version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Input dictionary entry dump, JSON Lines (default: input.jsonl)
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file (default: output.txt)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format: plaintext, sqlite or sqlcipher (default: sqlcipher)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable markup tag trimming
    #[arg(long)]
    pub disable_trim: bool,

    /// Decode invalid UTF-8 lossily instead of skipping the line
    #[arg(long)]
    pub auto_encoding: bool,

    /// Gzip the output (plaintext only)
    #[arg(long)]
    pub compressed: bool,

    /// Cipher name, only used with sqlcipher (default: aes-256-cbc)
    #[arg(short, long, value_name = "CIPHER")]
    pub cipher: Option<String>,

    /// Cipher key, only used with sqlcipher
    #[arg(short, long, env = "LDCONV_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Read the cipher key from a file (takes precedence over --key)
    #[arg(long, value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH", env = "LDCONV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags_parse() {
        let cli = Cli::try_parse_from([
            "ldconv", "-i", "in.jsonl", "-o", "out.db", "-f", "sqlcipher", "-c", "aes-256-cbc",
            "-k", "secret",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.jsonl")));
        assert_eq!(cli.output, Some(PathBuf::from("out.db")));
        assert_eq!(cli.format.as_deref(), Some("sqlcipher"));
        assert_eq!(cli.cipher.as_deref(), Some("aes-256-cbc"));
        assert_eq!(cli.key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["ldconv", "--quiet", "--verbose"]).is_err());
    }
}
