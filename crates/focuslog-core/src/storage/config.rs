//! TOML-based application configuration.
//!
//! Stores host preferences:
//! - Heatmap bucket width
//! - Elapsed ticker interval
//! - Default log level
//!
//! Scoring weights and suggestion thresholds are fixed and not configurable.
//!
//! Configuration is stored at `<config dir>/focuslog/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config_dir;
use crate::analytics::DEFAULT_HEATMAP_INTERVAL;
use crate::error::ConfigError;

/// Analytics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_heatmap_interval")]
    pub heatmap_interval_minutes: u64,
}

/// Elapsed-time ticker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Logging configuration. `FOCUSLOG_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_heatmap_interval() -> u64 {
    DEFAULT_HEATMAP_INTERVAL
}
fn default_tick_interval_ms() -> u64 {
    1_000
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            heatmap_interval_minutes: default_heatmap_interval(),
        }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Keys whose value must be a positive integer.
const POSITIVE_KEYS: [&str; 2] = ["analytics.heatmap_interval_minutes", "ticker.tick_interval_ms"];

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(ConfigError::UnknownKey(key.to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, preserving its type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;

        let pointer = format!("/{}", key.replace('.', "/"));
        if POSITIVE_KEYS.contains(&key)
            && json.pointer(&pointer).and_then(serde_json::Value::as_u64) == Some(0)
        {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "must be greater than zero".into(),
            });
        }
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Ticker interval, never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.ticker.tick_interval_ms.max(1))
    }

    /// Heatmap bucket width, never zero.
    pub fn heatmap_interval(&self) -> u64 {
        self.analytics.heatmap_interval_minutes.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.analytics.heatmap_interval_minutes, 5);
        assert_eq!(cfg.tick_interval(), Duration::from_secs(1));
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[analytics]\nheatmap_interval_minutes = 10\n").unwrap();
        assert_eq!(cfg.analytics.heatmap_interval_minutes, 10);
        assert_eq!(cfg.ticker.tick_interval_ms, 1_000);
    }

    #[test]
    fn get_and_set_by_path() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("analytics.heatmap_interval_minutes").as_deref(), Some("5"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("warn"));
        assert_eq!(cfg.get("analytics"), None);
        assert_eq!(cfg.get("nope"), None);

        cfg.set("analytics.heatmap_interval_minutes", "10").unwrap();
        cfg.set("logging.level", "debug").unwrap();
        assert_eq!(cfg.analytics.heatmap_interval_minutes, 10);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("ticker.tick_interval_ms", "fast"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("ticker.tick_interval_ms", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        for zero in ["00", "+0", " 0"] {
            assert!(matches!(
                cfg.set("analytics.heatmap_interval_minutes", zero),
                Err(ConfigError::InvalidValue { .. })
            ));
        }
        assert!(matches!(
            cfg.set("scoring.penalty", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("ticker", "1"), Err(ConfigError::UnknownKey(_))));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_writes_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("analytics.heatmap_interval_minutes", "15").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), changed);
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "analytics = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
