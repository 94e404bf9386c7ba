//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default API address
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the API address
pub const API_URL_ENV: &str = "TODO_API_URL";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Platform directories for this application
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "todo", "todo-account-tui")
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// API base URL
    pub api_base_url: Option<String>,
    /// Keep the session on disk between runs
    pub remember_session: Option<bool>,
    /// Connect timeout for API requests, in seconds
    pub connect_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: TuiConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// API base URL: environment, then file, then default
    pub fn api_base_url(&self) -> String {
        self.resolve_api_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn remember_session(&self) -> bool {
        self.remember_session.unwrap_or(true)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.remember_session.is_none());
        assert!(config.connect_timeout_secs.is_none());
        assert!(config.remember_session());
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_api_base_url_precedence() {
        let config = TuiConfig {
            api_base_url: Some("http://file:8000/api".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_base_url(Some("http://env:9000/api".to_string())),
            "http://env:9000/api"
        );
        assert_eq!(config.resolve_api_base_url(None), "http://file:8000/api");
        assert_eq!(
            config.resolve_api_base_url(Some("  ".to_string())),
            "http://file:8000/api"
        );
        assert_eq!(
            TuiConfig::default().resolve_api_base_url(None),
            DEFAULT_API_BASE_URL
        );
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"remember_session": false, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert!(!parsed.remember_session());
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = TuiConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"api_base_url": "https://todo.example.com/api", "connect_timeout_secs": 3}"#,
        )
        .unwrap();
        let config = TuiConfig::load_from(&path).unwrap();
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("https://todo.example.com/api")
        );
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_load_from_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(TuiConfig::load_from(&path).is_err());
    }
}
