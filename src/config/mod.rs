//! Configuration for the floodfis front end
//!
//! Settings cover presentation only: log verbosity, report format, input
//! clamping. Membership parameters and rules are fixed constants of the
//! model and are not configurable.
//!
//! # Configuration File Locations
//!
//! Searched in order (first found wins):
//! 1. `./floodfis.toml` - Project-local configuration
//! 2. `~/.config/floodfis/config.toml` - User configuration (XDG)
//! 3. `~/.floodfis/config.toml` - User configuration (legacy)
//! 4. `/etc/floodfis/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `FLOODFIS_LOG_LEVEL` - quiet, normal, verbose, debug
//! - `FLOODFIS_FORMAT` - text, json, csv
//! - `FLOODFIS_PRECISION` - decimals printed for crisp values
//! - `FLOODFIS_CLAMP` - clamp inputs to their nominal ranges (true/false)
//! - `FLOODFIS_CURVES` - include aggregated curves in reports (true/false)
//!
//! # Example Configuration
//!
//! ```toml
//! [general]
//! log_level = "normal"
//!
//! [inputs]
//! clamp = false
//!
//! [report]
//! format = "text"
//! precision = 2
//! include_curves = false
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Schema
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FloodConfig {
    pub general: GeneralConfig,
    pub inputs: InputConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: LogLevel,
}

/// Handling of raw inputs before they reach the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InputConfig {
    /// Clamp rainfall, water level and duration to their nominal universes
    pub clamp: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: OutputFormat,
    /// Decimal places for crisp values
    pub precision: usize,
    /// Emit the sampled aggregate curves
    pub include_curves: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: 2,
            include_curves: false,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary and rule table
    #[default]
    Text,
    /// Full assessment as JSON
    Json,
    /// Fired-rule table as CSV
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" | "0" => Some(LogLevel::Quiet),
            "normal" | "n" | "1" => Some(LogLevel::Normal),
            "verbose" | "v" | "2" => Some(LogLevel::Verbose),
            "debug" | "d" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// `tracing_subscriber::EnvFilter` directive for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "warn,floodfis=debug",
            LogLevel::Debug => "trace",
        }
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

impl FloodConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the first config file found, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<string>"), e.to_string()))
    }

    /// Config file search paths, highest priority first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./floodfis.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("floodfis").join("config.toml"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".floodfis").join("config.toml"));
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/floodfis/config.toml"));

        paths
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `FLOODFIS_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FLOODFIS_LOG_LEVEL") {
            self.general.log_level = LogLevel::parse(&val)
                .ok_or_else(|| ConfigError::invalid("FLOODFIS_LOG_LEVEL", &val))?;
        }

        if let Some(val) = lookup("FLOODFIS_FORMAT") {
            self.report.format = OutputFormat::parse(&val)
                .ok_or_else(|| ConfigError::invalid("FLOODFIS_FORMAT", &val))?;
        }

        if let Some(val) = lookup("FLOODFIS_PRECISION") {
            self.report.precision = val
                .parse::<usize>()
                .map_err(|_| ConfigError::invalid("FLOODFIS_PRECISION", &val))?;
        }

        if let Some(val) = lookup("FLOODFIS_CLAMP") {
            self.inputs.clamp =
                parse_flag(&val).ok_or_else(|| ConfigError::invalid("FLOODFIS_CLAMP", &val))?;
        }

        if let Some(val) = lookup("FLOODFIS_CURVES") {
            self.report.include_curves =
                parse_flag(&val).ok_or_else(|| ConfigError::invalid("FLOODFIS_CURVES", &val))?;
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Commented template matching the defaults
    pub fn default_config_content() -> &'static str {
        r#"# floodfis configuration

[general]
# Logging level: quiet, normal, verbose, debug
log_level = "normal"

[inputs]
# Clamp rainfall (0-300 mm/h), water level (0-5 m) and duration (0-24 h)
clamp = false

[report]
# Report format: text, json, csv
format = "text"
# Decimal places for flood risk and depth
precision = 2
# Include the sampled aggregate curves (json only)
include_curves = false
"#
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {}", .0.display(), .1)]
    Io(PathBuf, String),
    #[error("Parse error in {}: {}", .0.display(), .1)]
    Parse(PathBuf, String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    fn invalid(key: &str, value: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = FloodConfig::new();
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert_eq!(config.report.format, OutputFormat::Text);
        assert_eq!(config.report.precision, 2);
        assert!(!config.inputs.clamp);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [general]
            log_level = "verbose"

            [inputs]
            clamp = true

            [report]
            format = "json"
            include_curves = true
        "#;

        let config = FloodConfig::load_from_str(toml).unwrap();
        assert_eq!(config.general.log_level, LogLevel::Verbose);
        assert!(config.inputs.clamp);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(config.report.include_curves);
        assert_eq!(config.report.precision, 2);
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let parsed = FloodConfig::load_from_str(FloodConfig::default_config_content()).unwrap();
        assert_eq!(parsed, FloodConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = FloodConfig::load_from_str("[report]\nformat = \"pdf\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn test_overrides() {
        let mut config = FloodConfig::new();
        config
            .apply_overrides(lookup(&[
                ("FLOODFIS_LOG_LEVEL", "debug"),
                ("FLOODFIS_FORMAT", "CSV"),
                ("FLOODFIS_PRECISION", "4"),
                ("FLOODFIS_CLAMP", "yes"),
            ]))
            .unwrap();

        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.report.format, OutputFormat::Csv);
        assert_eq!(config.report.precision, 4);
        assert!(config.inputs.clamp);
        assert!(!config.report.include_curves);
    }

    #[test]
    fn test_invalid_override() {
        let mut config = FloodConfig::new();
        let err = config
            .apply_overrides(lookup(&[("FLOODFIS_PRECISION", "two")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "FLOODFIS_PRECISION".into(),
                value: "two".into()
            }
        );
    }

    #[test]
    fn test_serialize_config() {
        let toml = FloodConfig::new().to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[report]"));
    }

    #[test]
    fn test_config_paths() {
        let paths = FloodConfig::config_paths();
        assert!(paths[0].ends_with("floodfis.toml"));
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!(LogLevel::parse("v"), Some(LogLevel::Verbose));
        assert_eq!(LogLevel::Quiet.filter_directive(), "error");
        assert!(LogLevel::Verbose.filter_directive().contains("floodfis=debug"));
    }
}
