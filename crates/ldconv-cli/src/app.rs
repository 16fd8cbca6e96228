//! Request resolution and the extraction run.
//!
//! Flags override the config file, which overrides built-in defaults.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use zeroize::Zeroizing;

use ldconv_core::{
    ExtractionReport, JsonlSource, Orchestrator, OutputConfiguration, OutputFormat, SourceOptions,
};

use crate::cli::Cli;
use crate::config::{load_config, ConverterConfig};
use crate::constants::defaults;

/// Fully resolved request for one run.
pub struct Request {
    pub input: PathBuf,
    pub output: OutputConfiguration,
    pub source: SourceOptions,
}

/// Merge flags, config file and defaults into a `Request`.
pub fn resolve_request(cli: &mut Cli, config: &ConverterConfig) -> anyhow::Result<Request> {
    let input = cli
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(defaults::INPUT));
    let output_path = cli
        .output
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(defaults::OUTPUT));
    let format: OutputFormat = cli
        .format
        .as_deref()
        .or(config.output.format.as_deref())
        .unwrap_or(defaults::FORMAT)
        .parse()?;
    let cipher = cli
        .cipher
        .clone()
        .or_else(|| config.output.cipher.clone())
        .unwrap_or_else(|| defaults::CIPHER.to_string());
    let compressed = cli.compressed || config.output.compressed.unwrap_or(false);

    let mut output = OutputConfiguration::new(format, output_path)
        .cipher_name(cipher)
        .compressed(compressed);
    if let Some(key) = resolve_key(cli)? {
        output = output.cipher_key(key);
    }

    let source = SourceOptions {
        trim: !cli.disable_trim && config.source.trim.unwrap_or(true),
        auto_encoding: cli.auto_encoding || config.source.auto_encoding.unwrap_or(false),
    };

    Ok(Request {
        input,
        output,
        source,
    })
}

/// Take the key from `--key-file`, else from `--key`/`LDCONV_KEY`.
fn resolve_key(cli: &mut Cli) -> anyhow::Result<Option<SecretString>> {
    if let Some(path) = cli.key_file.as_deref() {
        return read_key_file(path).map(Some);
    }
    Ok(cli.key.take().map(SecretString::from))
}

fn read_key_file(path: &Path) -> anyhow::Result<SecretString> {
    let contents = Zeroizing::new(
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read key file {}: {}", path.display(), e))?,
    );
    let key = contents.trim_end_matches(&['\r', '\n'][..]);
    Ok(SecretString::from(key.to_string()))
}

/// Validate the request, then extract the input into the configured output.
pub fn run(mut cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let request = resolve_request(&mut cli, &config)?;

    let orchestrator = Orchestrator::new(&request.output, &request.input)?;
    let source = JsonlSource::open(&request.input, request.source)?;
    let report = orchestrator.run(source)?;

    if !cli.quiet {
        print_summary(&report, request.output.output_path());
    }
    Ok(())
}

fn print_summary(report: &ExtractionReport, output: &Path) {
    println!(
        "Extracted {} of {} entries to {}",
        report.written,
        report.read,
        output.display()
    );
    if !report.is_complete() {
        println!("Skipped {} entries (see warnings above)", report.skipped.len());
    }
}
