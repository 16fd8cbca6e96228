use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ConverterConfig {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub source: SourceSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub format: Option<String>,
    pub cipher: Option<String>,
    pub compressed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SourceSection {
    pub trim: Option<bool>,
    pub auto_encoding: Option<bool>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<ConverterConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Load the config file named on the command line, or the default one if present.
///
/// An explicitly named file must exist; a missing default file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConverterConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match default_config_path() {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(error = %err, "No default config location");
            return Ok(ConverterConfig::default());
        }
    };
    if !path.exists() {
        return Ok(ConverterConfig::default());
    }
    tracing::debug!(path = %path.display(), "Using default config");
    read_config(&path)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("ldconv"));
        }
    }
    Ok(home_dir()?.join(".config").join("ldconv"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
