//! Serve-loop configuration: pipeline parameters plus where trades go.

use barcast_core::config::{ConfigError, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default SQLite database path, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "trading_data.db";

/// ```toml
/// database = "trading_data.db"
/// persist = true
///
/// [pipeline]
/// window_sizes = [8, 13, 20, 25, 50]
/// parallel_windows = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub database: PathBuf,
    /// When false, trades go to an in-memory store that lives for one run.
    pub persist: bool,
    pub pipeline: PipelineConfig,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            persist: true,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServeConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
