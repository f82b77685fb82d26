//! Configuration management for docstat clients.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default backend API base URL. Every endpoint path is appended to it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default interval between document status polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

const ENV_LOG_LEVEL: &str = "DOCSTAT_LOG_LEVEL";
const ENV_API_URL: &str = "DOCSTAT_API_URL";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Backend API base URL, e.g. `http://localhost:8000/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Seconds between document status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_base_url: default_api_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl Config {
    /// Load configuration from `paths`, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    /// Apply `DOCSTAT_LOG_LEVEL` / `DOCSTAT_API_URL` overrides. Blank values
    /// are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            self.api_base_url = url;
        }
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> CoreResult<()> {
        let url = self.api_base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "api_base_url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(CoreError::Config(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the API base URL as a parsed URL.
    pub fn api_base_url(&self) -> CoreResult<Url> {
        Url::parse(&self.api_base_url).map_err(CoreError::from)
    }

    /// Interval between document status polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "log_level": "debug" }"#).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    #[test]
    fn test_config_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config {
            log_level: "trace".to_string(),
            api_base_url: "https://docs.example.com/api".to_string(),
            poll_interval_secs: 10,
        };
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded.log_level, "trace");
        assert_eq!(loaded.api_base_url, "https://docs.example.com/api");
        assert_eq!(loaded.poll_interval_secs, 10);
    }

    #[test]
    fn test_config_load_nonexistent_uses_defaults() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    #[test]
    fn test_overrides_apply_and_ignore_blank() {
        let env: HashMap<&str, &str> = [
            ("DOCSTAT_LOG_LEVEL", "  "),
            ("DOCSTAT_API_URL", "https://staging.example.com/api"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.api_base_url, "https://staging.example.com/api");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api_base_url = "not a valid url".to_string();
        assert!(matches!(config.validate(), Err(CoreError::InvalidUrl(_))));

        let mut config = Config::default();
        config.api_base_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let mut config = Config::default();
        config.poll_interval_secs = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
