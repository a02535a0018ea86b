//! TOML configuration for the CLI.
//!
//! ```toml
//! max_selection = 5
//! preset_dir = ".suplementor/presets"
//! default_export_format = "csv"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use suplementor_export::{ExportFormat, ExportOptions};
use suplementor_query::DEFAULT_MAX_SELECTION;
use tracing::{debug, info};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "suplementor.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_selection: usize,
    pub preset_dir: PathBuf,
    pub default_export_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_selection: DEFAULT_MAX_SELECTION,
            preset_dir: PathBuf::from(".suplementor/presets"),
            default_export_format: ExportFormat::Csv.as_str().to_string(),
        }
    }
}

impl Config {
    /// Loads `path`, or the default file when present, or built-in defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.export_format()?;
        anyhow::ensure!(config.max_selection > 0, "max_selection must be at least 1");
        Ok(config)
    }

    pub fn export_format(&self) -> Result<ExportFormat> {
        ExportOptions::parse_format(&self.default_export_format)
            .context("invalid default_export_format")
    }
}
