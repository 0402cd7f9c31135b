//! Application configuration.
//!
//! Loaded from a JSON file with one object per section; any section or
//! field left out falls back to its default, so a partial config file is
//! always valid. A missing file is not an error: the defaults describe a
//! working single-reader setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Serial port settings
    #[serde(default)]
    pub serial: SerialConfig,

    /// Reader loop settings
    #[serde(default)]
    pub reader: ReaderSection,

    /// Whitelist database settings
    #[serde(default)]
    pub database: DatabaseSection,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialConfig {
    /// Device path of the card reader
    #[serde(default = "default_port")]
    pub port: String,

    /// Baud rate of the serial link
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReaderSection {
    /// Debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Serial poll interval in milliseconds
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,

    /// Start with learn mode active
    #[serde(default)]
    pub learn_mode: bool,

    /// Label attached to cards enrolled via learn mode
    #[serde(default = "default_learn_label")]
    pub learn_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseSection {
    /// Path to the SQLite whitelist database
    #[serde(default = "default_database_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_port() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_baud_rate() -> u32 {
    vport_core::constants::DEFAULT_BAUD_RATE
}

fn default_debounce_ms() -> u64 {
    vport_core::constants::DEFAULT_DEBOUNCE_WINDOW.as_millis() as u64
}

fn default_poll_ms() -> u64 {
    vport_core::constants::DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_learn_label() -> String {
    "auto-enrolled".to_string()
}

fn default_database_path() -> String {
    "vport.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for ReaderSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            poll_ms: default_poll_ms(),
            learn_mode: false,
            learn_label: default_learn_label(),
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// A malformed file is still an error; only a missing one is forgiven.
    /// The caller decides whether a missing file is worth a log line.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
