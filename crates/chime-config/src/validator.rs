//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, SinkKind};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`], handing back the warnings otherwise.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_alarm(config, &mut result);
        Self::validate_sink(config, &mut result);
        Self::validate_logging(config, &mut result);
        result
    }

    fn validate_alarm(config: &Config, result: &mut ValidationResult) {
        if config.alarm.snooze_minutes == 0 {
            result.add_error(ValidationError::new(
                "alarm.snooze_minutes",
                "snooze_minutes must be at least 1",
            ));
        }

        if config.alarm.snooze_minutes > 24 * 60 {
            result.add_warning(ValidationWarning::new(
                "alarm.snooze_minutes",
                "snooze_minutes is longer than a day",
            ));
        }

        if config.alarm.default_message.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "alarm.default_message",
                "Default message is empty, alarms without a message will fire blank",
            ));
        }
    }

    fn validate_sink(config: &Config, result: &mut ValidationResult) {
        if config.sink.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "sink.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        match (&config.sink.kind, &config.sink.webhook_url) {
            (SinkKind::Webhook, None) => {
                result.add_error(ValidationError::new(
                    "sink.webhook_url",
                    "webhook_url is required when sink.kind is webhook",
                ));
            }
            (SinkKind::Webhook, Some(url)) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    result.add_error(ValidationError::new(
                        "sink.webhook_url",
                        "webhook_url must start with http:// or https://",
                    ));
                }
            }
            (_, Some(_)) => {
                result.add_warning(ValidationWarning::new(
                    "sink.webhook_url",
                    "webhook_url is ignored unless sink.kind is webhook",
                ));
            }
            (_, None) => {}
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level = config.logging.level.to_ascii_lowercase();
        // Full filter directives like "chime=debug" are passed through as-is.
        if !level.contains('=') && !valid_levels.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }

        if config.logging.file && config.logging.directory.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.directory",
                "directory cannot be empty when file logging is enabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
