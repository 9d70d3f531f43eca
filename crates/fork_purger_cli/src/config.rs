//! Configuration file handling for the fork-purger CLI.
//!
//! The configuration is stored in TOML format. It is optional: when no path is given
//! on the command line the CLI looks for [`DEFAULT_CONFIG_FILENAME`] in the current
//! directory and falls back to the built-in defaults if that file does not exist.

use std::{
    fs,
    path::{Path, PathBuf},
};

use fork_purger_core::PurgeConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "fork-purger.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings read from the configuration file.
///
/// Every value can be overridden on the command line.
///
/// # Example TOML Configuration
///
/// ```toml
/// api_url = "https://github.example.com/api/v3"
///
/// [purge]
/// concurrency = 8
/// queue_capacity = 50
/// page_size = 100
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the GitHub REST API, for GitHub Enterprise installations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Pipeline tunables
    #[serde(default)]
    pub purge: PurgeConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file doesn't exist, can't be read, or contains
    /// invalid TOML.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration for a run.
    ///
    /// An explicitly named file must exist. Without one, the default file in the
    /// current directory is used if present, otherwise the built-in defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the selected file can't be loaded.
    pub fn load_for(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);

        if config_path.is_none() && !path.exists() {
            debug!("No configuration file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load(&path)
    }
}

/// Resolves the path to the configuration file.
///
/// If a specific path is provided it is used as is. Otherwise this returns
/// `./fork-purger.toml` in the current directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
