//! Client configuration loaded from `config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend API, including the `/api` prefix.
    pub api_base_url: String,
    pub user_id: i64,
    /// Viewport width (logical pixels) below which the compact layout is used.
    pub compact_breakpoint: u32,
    /// Seconds between status polls for unfinished documents. 0 disables polling.
    pub status_poll_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
    pub upload: UploadConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            user_id: 1,
            compact_breakpoint: 768,
            upload: UploadConfig::default(),
            status_poll_secs: 5,
            request_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

/// Simulated upload progress. Real transfer progress is not reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub tick_ms: u64,
    pub step: u8,
    pub cap: u8,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            step: 10,
            cap: 90,
        }
    }
}

impl UploadConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

impl ClientConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file yields the defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// `<config dir>/doc-qa/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("doc-qa")
            .join("config.toml")
    }

    pub fn status_poll_interval(&self) -> Option<Duration> {
        (self.status_poll_secs > 0).then(|| Duration::from_secs(self.status_poll_secs))
    }
}
