//! Configuration file parsing and structures.
//!
//! devfleet reads an optional TOML file controlling logging and the default
//! device file. Every section may be omitted.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Targets;

/// Top-level configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default)]
    pub level: LogLevel,

    /// Per-target levels, e.g. `"devfleet::registry" = "debug"`
    #[serde(default)]
    pub overrides: HashMap<String, LogLevel>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegistryConfig {
    /// Device file loaded at startup. Without one the registry starts empty.
    #[serde(default)]
    pub devices_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().to_path_buf(), e))?;

        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Build the log filter: the global level plus any per-target overrides.
    pub fn log_filter(&self) -> Targets {
        Targets::new()
            .with_default(LevelFilter::from(self.logging.level))
            .with_targets(
                self.logging
                    .overrides
                    .iter()
                    .map(|(target, level)| (target.clone(), LevelFilter::from(*level))),
            )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.logging.overrides.is_empty());
        assert!(config.registry.devices_file.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [logging]
            level = "warn"

            [logging.overrides]
            "devfleet::registry" = "debug"

            [registry]
            devices_file = "/var/lib/devfleet/devices.txt"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(
            config.logging.overrides.get("devfleet::registry"),
            Some(&LogLevel::Debug)
        );
        assert_eq!(
            config.registry.devices_file.as_deref(),
            Some(Path::new("/var/lib/devfleet/devices.txt"))
        );
    }

    #[test]
    fn test_reject_unknown_level() {
        let toml = r#"
            [logging]
            level = "loud"
        "#;

        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_log_filter_levels() {
        let mut config = Config::default();
        config.logging.level = LogLevel::Warn;
        config
            .logging
            .overrides
            .insert("devfleet::registry".to_string(), LogLevel::Trace);

        let filter = config.log_filter();
        assert!(filter.would_enable("devfleet::device", &tracing::Level::WARN));
        assert!(!filter.would_enable("devfleet::device", &tracing::Level::INFO));
        assert!(filter.would_enable("devfleet::registry::loader", &tracing::Level::DEBUG));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/devfleet.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("devfleet.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }
}
