use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_API_BASE: &str = "https://teknikservisapi.mudbey.com.tr:7054";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid {var}: {value:?}")]
    Env { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    /// Where the bearer token is kept between runs; `None` keeps it in
    /// memory only.
    pub token_file: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_file: default_token_file(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// `SERVIS_CONFIG` names an optional JSON file; `SERVIS_API_BASE` and
    /// `SERVIS_TOKEN_FILE` override it.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("SERVIS_CONFIG") {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(base) = lookup("SERVIS_API_BASE") {
            config.api_base = base;
        }
        if let Some(file) = lookup("SERVIS_TOKEN_FILE") {
            config.token_file = Some(PathBuf::from(file)).filter(|p| !p.as_os_str().is_empty());
        }

        config.api_base = config.api_base.trim_end_matches('/').to_string();
        if config.api_base.is_empty() {
            tracing::warn!("api_base is empty; requests will use relative URLs and fail");
        }
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        read_config_file(path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Deserialize a JSON config file. Keys the target type does not declare
/// are ignored, so several layers can share one file.
pub fn read_config_file<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn default_token_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".servis").join("token"))
}
