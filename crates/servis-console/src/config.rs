use serde::Deserialize;
use servis_client::{ClientConfig, ConfigError, read_config_file};

/// How the console presents data. Read from the same `SERVIS_CONFIG`
/// file as [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Offset for rendered timestamps and form clocks, in minutes east of
    /// UTC.
    pub utc_offset_minutes: i32,
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 180,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub client: ClientConfig,
    pub display: DisplayConfig,
}

impl ConsoleConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Client settings as [`ClientConfig::from_lookup`]; display settings
    /// from the same file, then `SERVIS_PAGE_SIZE` and `SERVIS_UTC_OFFSET`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client = ClientConfig::from_lookup(&lookup)?;
        let mut display: DisplayConfig = match lookup("SERVIS_CONFIG") {
            Some(path) => read_config_file(&path)?,
            None => DisplayConfig::default(),
        };

        if let Some(size) = lookup("SERVIS_PAGE_SIZE") {
            display.page_size = size
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Env {
                    var: "SERVIS_PAGE_SIZE",
                    value: size,
                })?;
        }
        if let Some(offset) = lookup("SERVIS_UTC_OFFSET") {
            display.utc_offset_minutes = offset
                .parse::<i32>()
                .ok()
                .filter(|m| m.abs() < 24 * 60)
                .ok_or(ConfigError::Env {
                    var: "SERVIS_UTC_OFFSET",
                    value: offset,
                })?;
        }
        Ok(Self { client, display })
    }
}
