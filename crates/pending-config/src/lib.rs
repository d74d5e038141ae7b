//! Configuration management for pending-debits
//!
//! This module handles loading, validation, and management of
//! service configuration from YAML files. Nothing here is global:
//! the loaded `Config` is handed to the server state explicitly.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Transient file storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where rendered workbooks are kept for download
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./outputs")
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

/// Fixed columns written on every journal entry line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Memo text; the file period code ("09.2025") is appended
    #[serde(default = "default_memo_prefix")]
    pub memo_prefix: String,
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_subsidiary")]
    pub subsidiary: String,
    #[serde(default = "default_class")]
    pub class: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            memo_prefix: default_memo_prefix(),
            department: default_department(),
            location: default_location(),
            subsidiary: default_subsidiary(),
            class: default_class(),
        }
    }
}

fn default_memo_prefix() -> String {
    "dLocal Pending Debits".to_string()
}

fn default_department() -> String {
    "0000 Corporate".to_string()
}

fn default_location() -> String {
    "1 San Francisco".to_string()
}

fn default_subsidiary() -> String {
    "Gusto Inc Global : Gusto Inc US".to_string()
}

fn default_class() -> String {
    "601 Horizontal".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Output folder and upload limits
    #[serde(default)]
    pub storage: StorageConfig,
    /// Journal entry template columns
    #[serde(default)]
    pub journal: JournalConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.max_upload_bytes".to_string(),
                reason: "Upload limit must be greater than 0".to_string(),
            });
        }

        if self.journal.memo_prefix.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "journal.memo_prefix".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
