// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::SessionSettings;
use crate::types::request::MIN_JOB_DESCRIPTION_CHARS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the analysis service; `/analyze` is appended.
    pub service_url: String,
    pub database_path: PathBuf,
    pub log_path: PathBuf,
    pub min_selection_chars: usize,
    pub notification_ms: u64,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:5000".to_string(),
            database_path: PathBuf::from("data/jobfit.db"),
            log_path: PathBuf::from("/tmp/jobfit.log"),
            min_selection_chars: MIN_JOB_DESCRIPTION_CHARS,
            notification_ms: 3000,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<AppConfig>,
    #[serde(default)]
    production: Option<AppConfig>,
}

impl AppConfig {
    /// Load the section for `environment` from `path`. A missing file means defaults.
    ///
    /// Runs before logging is set up, so it logs nothing itself.
    pub fn load(path: &Path, environment: &str) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml(&content, environment)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        config.resolve_paths()
    }

    /// Where [`AppConfig::load`] takes its values from, for the startup log.
    pub fn describe_source(path: &Path, environment: &str) -> String {
        if path.exists() {
            format!("{} section of {}", environment, path.display())
        } else {
            format!("defaults ({} not found)", path.display())
        }
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(section.unwrap_or_default())
    }

    fn resolve_paths(self) -> Result<Self> {
        Ok(Self {
            database_path: Self::resolve_path(&self.database_path)?,
            log_path: Self::resolve_path(&self.log_path)?,
            ..self
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    pub fn with_service_url(mut self, url: String) -> Self {
        self.service_url = url;
        self
    }

    pub fn with_database_path(mut self, path: PathBuf) -> Self {
        self.database_path = path;
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            min_selection_chars: self.min_selection_chars,
            notification_ttl: Duration::from_millis(self.notification_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
local:
  service_url: "http://127.0.0.1:5000"
  min_selection_chars: 80
production:
  service_url: "https://jobfit.example.com"
  database_path: "/var/lib/jobfit/jobfit.db"
  request_timeout_secs: 45
"#;

    #[test]
    fn test_local_section_overrides_only_given_fields() {
        let config = AppConfig::from_yaml(YAML, "local").unwrap();
        assert_eq!(config.service_url, "http://127.0.0.1:5000");
        assert_eq!(config.min_selection_chars, 80);
        assert_eq!(config.notification_ms, 3000);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_production_section() {
        let config = AppConfig::from_yaml(YAML, "production").unwrap();
        assert_eq!(config.service_url, "https://jobfit.example.com");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(45)));
        assert_eq!(config.min_selection_chars, 50);
    }

    #[test]
    fn test_unknown_environment_falls_back_to_local() {
        let config = AppConfig::from_yaml(YAML, "staging").unwrap();
        assert_eq!(config.service_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_missing_file_gives_defaults_with_absolute_paths() {
        let config = AppConfig::load(Path::new("/nonexistent/jobfit.yaml"), "local").unwrap();
        assert_eq!(config.service_url, "http://localhost:5000");
        assert!(config.database_path.is_absolute());
        assert!(config.database_path.ends_with("data/jobfit.db"));
    }

    #[test]
    fn test_describe_source() {
        assert_eq!(
            AppConfig::describe_source(Path::new("/nonexistent/jobfit.yaml"), "local"),
            "defaults (/nonexistent/jobfit.yaml not found)"
        );

        let file = tempfile::NamedTempFile::new().unwrap();
        let described = AppConfig::describe_source(file.path(), "production");
        assert!(described.starts_with("production section of "));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(AppConfig::from_yaml("local: [unterminated", "local").is_err());
    }

    #[test]
    fn test_session_settings() {
        let settings = AppConfig::default().session_settings();
        assert_eq!(settings.min_selection_chars, 50);
        assert_eq!(settings.notification_ttl, Duration::from_millis(3000));
    }
}
