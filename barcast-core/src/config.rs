//! Pipeline configuration.
//!
//! Every tunable the pipeline uses lives here with a named default. Configs
//! load from TOML; missing keys take the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Fast EMA span for MACD.
pub const DEFAULT_MACD_FAST: usize = 12;
/// Slow EMA span for MACD.
pub const DEFAULT_MACD_SLOW: usize = 26;
/// Window for ATR, DI sums and ADX.
pub const DEFAULT_DMI_PERIOD: usize = 14;
/// Trailing rows the normalizer fits its scale on.
pub const DEFAULT_NORMALIZE_WINDOW: usize = 15;
/// Rolling window for the smoothed close.
pub const DEFAULT_SMOOTH_WINDOW: usize = 3;
/// Training window sizes, in processing order.
pub const DEFAULT_WINDOW_SIZES: [usize; 5] = [8, 13, 20, 25, 50];
/// ADX level a trend must exceed before a long/short call is made.
pub const DEFAULT_ADX_THRESHOLD: f64 = 25.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub dmi_period: usize,
    pub normalize_window: usize,
    pub smooth_window: usize,
    pub window_sizes: Vec<usize>,
    pub adx_threshold: f64,
    /// Fit training windows on the rayon pool instead of one after another.
    pub parallel_windows: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            macd_fast: DEFAULT_MACD_FAST,
            macd_slow: DEFAULT_MACD_SLOW,
            dmi_period: DEFAULT_DMI_PERIOD,
            normalize_window: DEFAULT_NORMALIZE_WINDOW,
            smooth_window: DEFAULT_SMOOTH_WINDOW,
            window_sizes: DEFAULT_WINDOW_SIZES.to_vec(),
            adx_threshold: DEFAULT_ADX_THRESHOLD,
            parallel_windows: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.macd_fast == 0 {
            return Err(ConfigError::Invalid("macd_fast must be >= 1".into()));
        }
        if self.macd_slow <= self.macd_fast {
            return Err(ConfigError::Invalid(format!(
                "macd_slow ({}) must be greater than macd_fast ({})",
                self.macd_slow, self.macd_fast
            )));
        }
        for (name, value) in [
            ("dmi_period", self.dmi_period),
            ("normalize_window", self.normalize_window),
            ("smooth_window", self.smooth_window),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 1")));
            }
        }
        if self.window_sizes.is_empty() {
            return Err(ConfigError::Invalid("window_sizes must not be empty".into()));
        }
        if self.window_sizes.contains(&0) {
            return Err(ConfigError::Invalid("window sizes must be >= 1".into()));
        }
        if !self.adx_threshold.is_finite() {
            return Err(ConfigError::Invalid("adx_threshold must be finite".into()));
        }
        Ok(())
    }
}
