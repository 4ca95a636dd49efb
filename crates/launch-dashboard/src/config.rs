//! Dashboard configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! data_path = "spacex_launch_dash.csv"
//! slider_step = 1000.0
//! slider_mark_count = 5
//! jitter_amplitude = 0.1
//! jitter_seed = 42
//! log_filter = "info,launch_binding=debug"
//! ```

use launch_binding::JitterOptions;
use launch_derive::JITTER_AMPLITUDE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file missing or unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Slider step must be positive and finite
    #[error("slider_step must be > 0, got {0}")]
    InvalidSliderStep(f64),

    /// At least the two end marks are needed
    #[error("slider_mark_count must be >= 2, got {0}")]
    InvalidMarkCount(usize),

    /// Jitter half-width must be positive and finite
    #[error("jitter_amplitude must be > 0, got {0}")]
    InvalidJitterAmplitude(f64),
}

/// Dashboard host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Launch table CSV
    pub data_path: PathBuf,
    /// Range slider step in kg
    pub slider_step: f64,
    /// Evenly spaced labelled marks on the range slider
    pub slider_mark_count: usize,
    /// Scatter jitter half-width
    pub jitter_amplitude: f64,
    /// Fixed jitter seed for reproducible output
    pub jitter_seed: Option<u64>,
    /// Fallback `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on bad TOML, or a validation error.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`DashboardConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    #[inline]
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_slider_step(mut self, step: f64) -> Self {
        self.slider_step = step;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// The first out-of-range field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.slider_step.is_finite() && self.slider_step > 0.0) {
            return Err(ConfigError::InvalidSliderStep(self.slider_step));
        }
        if self.slider_mark_count < 2 {
            return Err(ConfigError::InvalidMarkCount(self.slider_mark_count));
        }
        if !(self.jitter_amplitude.is_finite() && self.jitter_amplitude > 0.0) {
            return Err(ConfigError::InvalidJitterAmplitude(self.jitter_amplitude));
        }
        Ok(())
    }

    /// Jitter settings for new sessions
    #[must_use]
    pub fn jitter_options(&self) -> JitterOptions {
        JitterOptions {
            amplitude: self.jitter_amplitude,
            seed: self.jitter_seed,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            slider_step: 1000.0,
            slider_mark_count: 5,
            jitter_amplitude: JITTER_AMPLITUDE,
            jitter_seed: None,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DashboardConfig::from_toml_str("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = DashboardConfig::from_toml_str(
            "data_path = \"/data/launches.csv\"\njitter_seed = 42\nslider_mark_count = 3\n",
        )
        .unwrap();

        assert_eq!(cfg.data_path, PathBuf::from("/data/launches.csv"));
        assert_eq!(cfg.jitter_seed, Some(42));
        assert_eq!(cfg.slider_mark_count, 3);
        assert_eq!(cfg.slider_step, 1000.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            DashboardConfig::from_toml_str("slider_step = 0.0"),
            Err(ConfigError::InvalidSliderStep(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("slider_mark_count = 1"),
            Err(ConfigError::InvalidMarkCount(1))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("jitter_amplitude = -0.1"),
            Err(ConfigError::InvalidJitterAmplitude(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            DashboardConfig::from_toml_str("jitter = 0.2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn jitter_options_follow_config() {
        let opts = DashboardConfig::new().with_jitter_seed(5).jitter_options();
        assert_eq!(opts.seed, Some(5));
        assert_eq!(opts.amplitude, JITTER_AMPLITUDE);
    }
}
