use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{zlog_debug, Error, Result};

/// Word lookup endpoint used when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "https://api.poocoo.pl/api/v1/words-from-letters";

/// Settle period before a typed query is sent.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub debounce_ms: Option<u64>,
    /// Drop responses that belong to a superseded query.
    #[serde(default)]
    pub stale_guard: bool,
    pub request_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn app_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or(Error::NoHomeDir)?
            .join(".anagramator"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    pub fn effective_api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        zlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            zlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        zlog_debug!(
            "Config loaded: api_url={:?}, debounce_ms={:?}, stale_guard={}, request_timeout_ms={:?}",
            config.api_url,
            config.debounce_ms,
            config.stale_guard,
            config.request_timeout_ms
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                zlog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        zlog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        let url = self.effective_api_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Validation(format!(
                "api_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        if self.debounce_ms == Some(0) {
            return Err(Error::Validation(
                "debounce_ms must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(Error::Validation(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(level) = &self.log_level {
            if crate::log::LogLevel::parse(level).is_none() {
                return Err(Error::Validation(format!("unknown log_level '{}'", level)));
            }
        }
        Ok(())
    }
}
