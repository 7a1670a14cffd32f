//! Application configuration.
//!
//! Defaults, overridden by `config.toml` in the platform config dir,
//! overridden in turn by `ANIRATE_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::search::provider::DEFAULT_BASE_URL;

/// Rating service the route paths point at.
pub const DEFAULT_HOST_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the search API.
    pub api_base_url: String,
    /// Base URL of the rating service.
    pub host_url: String,
    /// Trailing-edge debounce delay in milliseconds.
    pub debounce_ms: u64,
    /// Minimum trimmed query length that triggers a search.
    pub min_query_len: usize,
    /// Cap on suggestions per session.
    pub suggestion_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            host_url: DEFAULT_HOST_URL.to_string(),
            debounce_ms: 300,
            min_query_len: 2,
            suggestion_limit: 10,
        }
    }
}

impl AppConfig {
    /// Load from the default config path plus env overrides. Missing or
    /// malformed files fall back to defaults; env always applies last.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string(default_config_path()) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("ignoring malformed config file: {err}");
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Load from an explicit path; unlike [`load`](Self::load), a missing
    /// or malformed file is an error the caller asked to see.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.apply_env();
        Ok(config)
    }

    /// Apply `ANIRATE_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| dotenvy::var(key).ok());
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get("ANIRATE_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(url) = get("ANIRATE_HOST_URL") {
            self.host_url = url;
        }
        if let Some(val) = get("ANIRATE_DEBOUNCE_MS")
            && let Ok(ms) = val.parse()
        {
            self.debounce_ms = ms;
        }
        if let Some(val) = get("ANIRATE_MIN_QUERY_LEN")
            && let Ok(len) = val.parse()
        {
            self.min_query_len = len;
        }
        if let Some(val) = get("ANIRATE_SUGGESTION_LIMIT")
            && let Ok(limit) = val.parse()
        {
            self.suggestion_limit = limit;
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("art", "sakurate", "anirate").map_or_else(
        || PathBuf::from("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("art", "sakurate", "anirate").map_or_else(
        || PathBuf::from("."),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_search_constants() {
        let config = AppConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.suggestion_limit, 10);
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn load_from_reads_partial_toml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "debounce_ms = 150\napi_base_url = \"http://127.0.0.1:9/v4\"\n")
            .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.api_base_url, "http://127.0.0.1:9/v4");
        // Unspecified keys keep their defaults.
        assert_eq!(config.suggestion_limit, 10);
    }

    #[test]
    fn load_from_missing_file_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(AppConfig::load_from(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn overrides_apply_and_ignore_unparseable_numbers() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ANIRATE_API_BASE_URL", "http://stub/v4"),
            ("ANIRATE_DEBOUNCE_MS", "50"),
            ("ANIRATE_MIN_QUERY_LEN", "three"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "http://stub/v4");
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.min_query_len, 2);
    }
}
