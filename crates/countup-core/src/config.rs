use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::progressive::ProgressOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Timing and formatting defaults for count animations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Fractional digits shown for each value
    #[serde(default)]
    pub decimals: u32,
    /// Total animation duration in milliseconds
    #[serde(default = "default_duration")]
    pub duration_ms: u64,
    /// Delay between steps in milliseconds (must be > 0)
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            decimals: 0,
            duration_ms: default_duration(),
            delay_ms: default_delay(),
        }
    }
}

impl AnimationConfig {
    /// Convert to run options
    pub fn options(&self) -> ProgressOptions {
        ProgressOptions {
            decimals: self.decimals,
            duration: Duration::from_millis(self.duration_ms),
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

/// How the CLI prints each step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare formatted value
    #[default]
    Plain,
    /// One JSON object per step
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "plain" or "json"
    #[serde(default)]
    pub format: OutputFormat,
    /// Overwrite the same terminal line instead of printing one line per step
    #[serde(default)]
    pub inline: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_duration() -> u64 {
    1500
}

fn default_delay() -> u64 {
    5
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/countup/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("countup")
            .join("config.toml")
    }
}
