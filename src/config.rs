//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Protocol constants are not configurable; they live in
//! [`crate::emos::protocol`]. This file only covers the host application.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{DecoderError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Capture input configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct InputConfig {
    /// Capture text file; empty reads stdin
    #[serde(default)]
    pub path: String,
}

/// Reading output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: String,

    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily log files; empty logs to stderr only
    #[serde(default)]
    pub file_dir: String,
}

/// Supported output formats
pub const OUTPUT_FORMATS: &[&str] = &["json", "kv"];

/// Supported log levels
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// Default value functions
fn default_output_format() -> String { "json".to_string() }
fn default_timestamps() -> bool { true }

fn default_log_level() -> String { "info".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            timestamps: default_timestamps(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_dir: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use emos_decoder::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            return Err(DecoderError::Config(toml::de::Error::custom(format!(
                "output format must be one of: {}",
                OUTPUT_FORMATS.join(", ")
            ))));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(DecoderError::Config(toml::de::Error::custom(format!(
                "log level must be one of: {}",
                LOG_LEVELS.join(", ")
            ))));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.input.path.is_empty());
        assert_eq!(config.output.format, "json");
        assert!(config.output.timestamps);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.output.format, "json");
        assert!(config.logging.file_dir.is_empty());
    }

    #[test]
    fn test_invalid_output_format() {
        let mut config = Config::default();
        config.output.format = "csv".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let result = Config::from_toml("[logging]\nlevel = \"verbose\"\n");
        assert!(matches!(result, Err(DecoderError::Config(_))));
    }

    #[test]
    fn test_valid_formats_and_levels() {
        for &format in OUTPUT_FORMATS {
            for &level in LOG_LEVELS {
                let mut config = Config::default();
                config.output.format = format.to_string();
                config.logging.level = level.to_string();
                assert!(config.validate().is_ok(), "{} / {} should be valid", format, level);
            }
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(Config::from_toml("[output\nformat = 1").is_err());
        assert!(Config::from_toml("[output]\ntimestamps = \"yes\"\n").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[input]
path = "captures/e6016.txt"

[output]
format = "kv"
timestamps = false

[logging]
level = "debug"
file_dir = "./logs"
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.input.path, "captures/e6016.txt");
        assert_eq!(config.output.format, "kv");
        assert!(!config.output.timestamps);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_dir, "./logs");
    }

    #[test]
    fn test_shipped_default_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let config = Config::load(path).unwrap();
        assert!(config.input.path.is_empty());
        assert_eq!(config.output.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/emos-decoder.toml");
        assert!(matches!(result, Err(DecoderError::Io(_))));
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_output_format(), "json");
        assert_eq!(default_timestamps(), true);
        assert_eq!(default_log_level(), "info");
    }
}
