//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.chime/logs`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SinkKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.alarm.snooze_minutes, 5);
        assert_eq!(config.sink.kind, SinkKind::Console);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [alarm]
            default_message = "Ding"
            snooze_minutes = 15

            [sink]
            kind = "webhook"
            webhook_url = "http://localhost:9000/alarms"
            timeout_seconds = 3

            [logging]
            level = "debug"
            directory = "/tmp/chime"
            file = false
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.alarm.default_message, "Ding");
        assert_eq!(config.alarm.snooze_minutes, 15);
        assert_eq!(config.sink.kind, SinkKind::Webhook);
        assert_eq!(
            config.sink.webhook_url.as_deref(),
            Some("http://localhost:9000/alarms")
        );
        assert_eq!(config.sink.timeout_seconds, 3);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[alarm]").unwrap();
        writeln!(file, "snooze_minutes = 2").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.alarm.snooze_minutes, 2);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/chime.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test-only variable name, not read anywhere else
        unsafe {
            std::env::set_var("CHIME_TEST_WEBHOOK", "http://hooks.local/a");
        }
        let content = "[sink]\nkind = \"webhook\"\nwebhook_url = \"${CHIME_TEST_WEBHOOK}\"\n";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.sink.webhook_url.as_deref(), Some("http://hooks.local/a"));
        unsafe {
            std::env::remove_var("CHIME_TEST_WEBHOOK");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${CHIME_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        assert_eq!(ConfigLoader::expand_env_vars(content).unwrap(), content);
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(ConfigLoader::expand_path("/var/log/chime"), "/var/log/chime");
        let expanded = ConfigLoader::expand_path("~/logs");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/logs"));
    }
}
