//! Runtime configuration
//!
//! Configuration loaded from `.uniflow.toml`. Every field is optional in the
//! file and falls back to its default.

use crate::ConfigError;
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration for stores and the built-in middleware
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Whether the logging middleware logs dispatched actions
    #[serde(default = "default_log_actions")]
    pub log_actions: bool,

    /// Whether the logging middleware logs the state after each dispatch
    #[serde(default)]
    pub log_state: bool,

    /// Level used by the logging middleware ("error", "warn", "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Buffer size of the action publisher's broadcast channel
    #[serde(default = "default_publisher_capacity")]
    pub publisher_capacity: usize,
}

fn default_log_actions() -> bool {
    true
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_publisher_capacity() -> usize {
    64
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_actions: default_log_actions(),
            log_state: false,
            log_level: default_log_level(),
            publisher_capacity: default_publisher_capacity(),
        }
    }
}

impl RuntimeConfig {
    /// Load config from CWD first, then home directory, or use defaults
    ///
    /// A file that fails to parse is reported and ignored.
    pub fn load() -> Self {
        Self::from_content_or_default(crate::load_config_file().as_deref())
    }

    fn from_content_or_default(content: Option<&str>) -> Self {
        if let Some(content) = content {
            match Self::from_toml_str(content) {
                Ok(config) => {
                    log::info!("Loaded runtime config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("{}", e);
                }
            }
        }

        log::debug!("Using default runtime config");
        Self::default()
    }

    /// Parse a config from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from an explicit path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Level the logging middleware writes at
    ///
    /// Unknown names fall back to `Debug`.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "error" => Level::Error,
            "warn" => Level::Warn,
            "info" => Level::Info,
            "debug" => Level::Debug,
            "trace" => Level::Trace,
            other => {
                log::warn!("Unknown log level '{}', using debug", other);
                Level::Debug
            }
        }
    }

    /// Filter matching [`RuntimeConfig::level`], for installing a logger
    pub fn level_filter(&self) -> LevelFilter {
        self.level().to_level_filter()
    }
}
