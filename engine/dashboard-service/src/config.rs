//! Configuration for the dashboard service

use anyhow::{Context, Result};
use scout_engine::{EngineConfig, WeightScheme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the dashboard service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Store configuration
    pub store: StoreConfig,

    /// Aggregation engine configuration
    pub engine: EngineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding teams.json, team_rounds.json, picks.json and clubs.json
    pub data_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl DashboardConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        config.apply_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path:?}"))?;
        Ok(config)
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(data_dir) = std::env::var("SCOUT_DATA_DIR") {
            self.store.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(level) = std::env::var("SCOUT_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("SCOUT_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Ok(scheme) = std::env::var("SCOUT_WEIGHT_SCHEME") {
            self.engine.weight_scheme = WeightScheme::parse(&scheme)
                .ok_or_else(|| anyhow::anyhow!("Invalid SCOUT_WEIGHT_SCHEME: {scheme}"))?;
        }

        if let Ok(window) = std::env::var("SCOUT_MOVING_AVG_WINDOW") {
            self.engine.moving_average_window = window
                .parse()
                .with_context(|| format!("Invalid SCOUT_MOVING_AVG_WINDOW: {window}"))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            _ => return Err(anyhow::anyhow!("Invalid log format: {}", self.logging.format)),
        }

        self.engine.validate().context("Invalid engine configuration")?;

        Ok(())
    }

    /// Serialize configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.data_dir, PathBuf::from("./data"));
        assert_eq!(config.engine.weight_scheme, WeightScheme::Canonical);
    }

    #[test]
    fn test_load_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[store]
data_dir = "/var/lib/scout"

[engine]
weight_scheme = "legacy"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = DashboardConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.store.data_dir, PathBuf::from("/var/lib/scout"));
        assert_eq!(config.engine.weight_scheme, WeightScheme::Legacy);
        assert_eq!(config.engine.moving_average_window, 3);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_weights_from_toml() {
        let config: DashboardConfig = toml::from_str(
            r#"
[[engine.custom_weights]]
code = "G"
points = 10.0

[[engine.custom_weights]]
code = "A"
points = 6.0
"#,
        )
        .unwrap();

        let table = config.engine.weight_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.weight("A"), Some(6.0));
    }

    #[test]
    fn test_invalid_logging_rejected() {
        let mut config = DashboardConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DashboardConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: DashboardConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.logging.level, config.logging.level);
        assert_eq!(parsed.engine.scout_epsilon, config.engine.scout_epsilon);
    }
}
