//! On-disk settings. Sessions themselves are never persisted.

mod config;

pub use config::{AnalyticsConfig, Config, LoggingConfig, TickerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the focuslog config directory.
///
/// `FOCUSLOG_CONFIG_DIR` overrides the location. Otherwise the platform
/// config dir is used, with a `focuslog-dev` subdirectory when
/// `FOCUSLOG_ENV=dev`.
///
/// # Errors
/// Returns an error if no config directory can be determined or created.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FOCUSLOG_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
            let env = std::env::var("FOCUSLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base.join("focuslog-dev")
            } else {
                base.join("focuslog")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
