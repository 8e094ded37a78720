//! Poller configuration file support.
//!
//! Loads and validates driver configuration from TOML files.
//! Default location: /etc/nms/poller.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DriverError, DriverResult};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/nms/poller.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// SNMP query configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnmpConfig {
    /// Overrides the vendor MIB directory a driver asks for
    #[serde(default)]
    pub mib_dir: Option<String>,
}

/// Which poller modules are enabled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesConfig {
    #[serde(default = "default_true")]
    pub processors: bool,

    #[serde(default = "default_true")]
    pub nac: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Complete poller configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollerConfig {
    #[serde(default)]
    pub snmp: SnmpConfig,

    #[serde(default)]
    pub modules: ModulesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            processors: default_true(),
            nac: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl PollerConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str, origin: &Path) -> DriverResult<Self> {
        toml::from_str(content).map_err(|e| DriverError::Decode {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> DriverResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(DriverError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> DriverResult<()> {
        if let Some(dir) = &self.snmp.mib_dir {
            if dir.trim().is_empty() {
                return Err(DriverError::invalid_config(
                    "snmp.mib_dir",
                    "must not be empty when set",
                ));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(DriverError::invalid_config(
                "logging.level",
                format!("unknown level '{}'", self.logging.level),
            ));
        }

        Ok(())
    }
}
