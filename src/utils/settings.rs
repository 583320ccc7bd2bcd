//! Settings and configuration utilities.
//!
//! Settings are read from `$HOME/.git-event-monitor/settings.json` and used as
//! a fallback for environment variables:
//!
//! ```json
//! { "env": { "GITHUB_TOKEN": "ghp_...", "GITEE_API_URL": "https://gitee.example/api/v5" } }
//! ```

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::platform::{gitee, github, Platform};

/// Settings loaded from `$HOME/.git-event-monitor/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path; a missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".git-event-monitor").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    ///
    /// Empty values count as unset.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        let non_empty = |value: &String| !value.trim().is_empty();
        env::var(key)
            .ok()
            .filter(non_empty)
            .or_else(|| self.env.get(key).cloned().filter(non_empty))
    }

    /// Resolves a platform token: explicit value, then environment, then
    /// settings.
    pub fn resolve_token(&self, platform: Platform, explicit: Option<String>) -> Option<String> {
        let explicit = explicit.filter(|token| !token.trim().is_empty());
        if explicit.is_some() {
            return explicit;
        }
        let token = self.get_env_var(token_env_var(platform));
        debug!(%platform, found = token.is_some(), "Resolved token from environment");
        token
    }

    /// Resolves the REST base URL for a platform.
    pub fn api_base_url(&self, platform: Platform) -> String {
        let default = match platform {
            Platform::GitHub => github::DEFAULT_BASE_URL,
            Platform::Gitee => gitee::DEFAULT_BASE_URL,
        };
        self.get_env_var(base_url_env_var(platform))
            .unwrap_or_else(|| default.to_string())
    }
}

/// Environment variable holding the token for `platform`.
pub fn token_env_var(platform: Platform) -> &'static str {
    match platform {
        Platform::GitHub => "GITHUB_TOKEN",
        Platform::Gitee => "GITEE_TOKEN",
    }
}

/// Environment variable overriding the API base URL for `platform`.
pub fn base_url_env_var(platform: Platform) -> &'static str {
    match platform {
        Platform::GitHub => "GITHUB_API_URL",
        Platform::Gitee => "GITEE_API_URL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_with(json: &str) -> Settings {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.json");
        fs::write(&settings_path, json).unwrap();
        Settings::load_from_path(&settings_path).unwrap()
    }

    #[test]
    fn settings_load_from_path() {
        let settings = settings_with(
            r#"{
                "env": {
                    "GITHUB_TOKEN": "ghp_settings",
                    "GITEE_API_URL": "http://localhost:9000/api/v5"
                }
            }"#,
        );

        assert_eq!(settings.env.get("GITHUB_TOKEN").unwrap(), "ghp_settings");
        assert_eq!(settings.env.len(), 2);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(temp_dir.path().join("absent.json")).unwrap();
        assert!(settings.env.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn environment_takes_precedence_over_settings() {
        let settings = settings_with(r#"{ "env": { "GEM_TEST_PRECEDENCE": "from_settings" } }"#);

        env::set_var("GEM_TEST_PRECEDENCE", "from_env");
        assert_eq!(
            settings.get_env_var("GEM_TEST_PRECEDENCE").as_deref(),
            Some("from_env")
        );

        env::remove_var("GEM_TEST_PRECEDENCE");
        assert_eq!(
            settings.get_env_var("GEM_TEST_PRECEDENCE").as_deref(),
            Some("from_settings")
        );
    }

    #[test]
    fn empty_environment_value_falls_back_to_settings() {
        let settings = settings_with(r#"{ "env": { "GEM_TEST_EMPTY_ENV": "from_settings" } }"#);

        env::set_var("GEM_TEST_EMPTY_ENV", "");
        assert_eq!(
            settings.get_env_var("GEM_TEST_EMPTY_ENV").as_deref(),
            Some("from_settings")
        );
        env::remove_var("GEM_TEST_EMPTY_ENV");

        let blank = settings_with(r#"{ "env": { "GEM_TEST_EMPTY_ENV": "  " } }"#);
        assert_eq!(blank.get_env_var("GEM_TEST_EMPTY_ENV"), None);
    }

    #[test]
    fn explicit_token_wins() {
        let settings = Settings::default();
        assert_eq!(
            settings.resolve_token(Platform::Gitee, Some("explicit".to_string())),
            Some("explicit".to_string())
        );
    }

    #[test]
    fn base_url_defaults() {
        let settings = settings_with(r#"{ "env": {} }"#);
        if env::var("GITHUB_API_URL").is_err() {
            assert_eq!(
                settings.api_base_url(Platform::GitHub),
                "https://api.github.com"
            );
        }
        if env::var("GITEE_API_URL").is_err() {
            assert_eq!(
                settings.api_base_url(Platform::Gitee),
                "https://gitee.com/api/v5"
            );
        }
    }

    #[test]
    fn env_var_names() {
        assert_eq!(token_env_var(Platform::GitHub), "GITHUB_TOKEN");
        assert_eq!(base_url_env_var(Platform::Gitee), "GITEE_API_URL");
    }
}
