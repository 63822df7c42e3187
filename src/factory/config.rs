//! Serializable factory configuration
//!
//! Every field is optional in JSON; missing fields take the same defaults a
//! fresh [`LoggerFactory`](super::LoggerFactory) uses.
//!
//! ```
//! use logger_factory::{FactoryConfig, LoggerFactory, LogLevel};
//!
//! let config = FactoryConfig::from_json_str(r#"{
//!     "console_err": {"low": "ERROR", "high": "CRITICAL"},
//!     "file_format": "{timestamp} [{logger}] {level}: {message}",
//!     "destinations": [
//!         {"path": "logs/app.log", "range": {"low": "DEBUG", "high": "CRITICAL"}, "mode": "replace"}
//!     ]
//! }"#).unwrap();
//! assert_eq!(config.console_err.low, LogLevel::ERROR);
//!
//! let factory = LoggerFactory::from_config(config);
//! assert_eq!(factory.destinations().len(), 1);
//! ```

use super::destination::Destination;
use crate::core::{FormatTemplate, LevelRange, LoggerError, Result, TimestampFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub console_out: LevelRange,
    pub console_err: LevelRange,
    pub console_format: FormatTemplate,
    pub file_format: FormatTemplate,
    pub timestamp_format: TimestampFormat,
    pub console_colors: bool,
    pub destinations: Vec<Destination>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            console_out: LevelRange::CONSOLE_OUT,
            console_err: LevelRange::CONSOLE_ERR,
            console_format: FormatTemplate::console_default(),
            file_format: FormatTemplate::file_default(),
            timestamp_format: TimestampFormat::default(),
            console_colors: false,
            destinations: Vec::new(),
        }
    }
}

impl FactoryConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LoggerError::io_operation("reading logger config", path, e))?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)
            .map_err(|e| LoggerError::io_operation("writing logger config", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use crate::factory::WriteMode;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_is_default() {
        let config = FactoryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FactoryConfig::default());
    }

    #[test]
    fn test_invalid_template_rejected() {
        let err = FactoryConfig::from_json_str(r#"{"console_format": "{when} {message}"}"#)
            .unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
        assert!(err.to_string().contains("when"));
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("logging.json");

        let config = FactoryConfig {
            console_colors: true,
            timestamp_format: TimestampFormat::Iso8601,
            destinations: vec![Destination::new("logs/errors.log")
                .with_levels(LogLevel::WARN, LogLevel::CRITICAL)
                .with_mode(WriteMode::ReplaceOnce)],
            ..FactoryConfig::default()
        };
        config.save_json_file(&path).unwrap();

        assert_eq!(FactoryConfig::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = FactoryConfig::from_json_file("/nonexistent/logging.json").unwrap_err();
        assert_eq!(err.path(), Some(Path::new("/nonexistent/logging.json")));
    }
}
