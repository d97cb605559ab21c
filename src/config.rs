//! Decoder configuration loaded from TOML.

use crate::games::backgammon::Side;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the command-line decoder.
///
/// ```toml
/// log_filter = "strictly_fibs=debug"
/// skip_unrecognized = true
/// side = "Black"
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct FibsConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Drop lines no rule could decode from the output.
    #[serde(default)]
    skip_unrecognized: bool,

    /// Drop blank lines from the output.
    #[serde(default = "default_skip_empty")]
    skip_empty: bool,

    /// Side whose move `check` reconstructs.
    #[serde(default = "default_side")]
    side: Side,
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

#[instrument]
fn default_skip_empty() -> bool {
    true
}

#[instrument]
fn default_side() -> Side {
    Side::White
}

impl Default for FibsConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            skip_unrecognized: false,
            skip_empty: default_skip_empty(),
            side: default_side(),
        }
    }
}

impl FibsConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(log_filter = %config.log_filter, side = %config.side, "Config loaded");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(FibsConfig::from_toml("").unwrap(), FibsConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = FibsConfig::from_toml("skip_empty = false\nside = \"Black\"").unwrap();
        assert!(!config.skip_empty());
        assert_eq!(*config.side(), Side::Black);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_bad_toml_reports_parse_error() {
        let error = FibsConfig::from_toml("side = 3").unwrap_err();
        assert!(error.message.starts_with("Failed to parse config"));
    }
}
