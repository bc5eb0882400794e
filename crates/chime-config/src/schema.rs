//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alarm: AlarmConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Default location of the config file: `~/.chime/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".chime").join("config.toml"))
    }
}

/// Alarm tool defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Message used when `set_alarm` is called without one.
    #[serde(default = "default_message")]
    pub default_message: String,

    #[serde(default = "default_snooze_minutes")]
    pub snooze_minutes: u64,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            default_message: default_message(),
            snooze_minutes: default_snooze_minutes(),
        }
    }
}

fn default_message() -> String {
    "Alarm time is up!".to_string()
}

fn default_snooze_minutes() -> u64 {
    5
}

/// Where fired alarms are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Notification lines on stdout.
    #[default]
    Console,
    /// Log lines only.
    Log,
    /// HTTP POST to `webhook_url`.
    Webhook,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub kind: SinkKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            webhook_url: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_log_directory")]
    pub directory: String,

    /// Whether to also write a daily-rolling log file.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_log_directory(),
            file: true,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "~/.chime/logs".to_string()
}

fn default_true() -> bool {
    true
}
