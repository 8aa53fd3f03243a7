use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use popcorn_api::omdb::ClientSettings;

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

pub const ENV_API_URL: &str = "POPCORN_API_URL";
pub const ENV_API_KEY: &str = "POPCORN_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "POPCORN_TIMEOUT_SECS";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Seconds; `0` disables the timeout.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub min_query_len: usize,
    pub initial_query: String,
}

impl AppConfig {
    /// Load config: built-in defaults, then the user file (if it exists),
    /// then `POPCORN_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Defaults merged with the file at `path`. A missing file yields the
    /// defaults; keys absent from the file keep their default values.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let mut merged: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CoreError::Config(e.to_string()))?;

        if path.exists() {
            tracing::debug!(path = %path.display(), "Reading user config");
            let user_str = std::fs::read_to_string(path)?;
            let user: toml::Table = toml::from_str(&user_str)
                .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
            merge_tables(&mut merged, user);
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| CoreError::Config(e.to_string()))
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), CoreError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api.api_key = key;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = secs.trim().parse().map_err(|_| {
                CoreError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number, got {secs:?}"
                ))
            })?;
        }
        Ok(())
    }

    /// Validate the API section and turn it into client settings.
    ///
    /// Fails when the key is missing or the URL is not http(s).
    pub fn credentials(&self) -> Result<ClientSettings, CoreError> {
        let api_key = self.api.api_key.trim();
        if api_key.is_empty() {
            return Err(CoreError::Config(format!(
                "no API key configured; set {ENV_API_KEY} or api.api_key"
            )));
        }

        let base_url = Url::parse(self.api.base_url.trim()).map_err(|e| {
            CoreError::Config(format!("invalid API URL {:?}: {e}", self.api.base_url))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "API URL must be http or https, got {}",
                base_url.scheme()
            )));
        }

        Ok(ClientSettings {
            base_url,
            api_key: api_key.to_string(),
            timeout: (self.api.timeout_secs > 0)
                .then(|| Duration::from_secs(self.api.timeout_secs)),
        })
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for log files.
    pub fn log_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "popcorn")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

/// Recursively overlay `overlay` onto `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(over_tbl) = value {
            if let Some(toml::Value::Table(base_tbl)) = base.get_mut(&key) {
                merge_tables(base_tbl, over_tbl);
                continue;
            }
            base.insert(key, toml::Value::Table(over_tbl));
        } else {
            base.insert(key, value);
        }
    }
}
