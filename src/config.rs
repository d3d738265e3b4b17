use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the survey service API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// UI theme: "dark", "light" or "no-color".
    #[serde(default = "default_theme")]
    pub theme: String,
    /// How long a transient message stays on screen, in seconds.
    #[serde(default = "default_message_secs")]
    pub message_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_message_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: default_theme(),
            message_secs: default_message_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file or create it with defaults.
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: Config =
                toml::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file.
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }
}

/// Default location of the config file (`~/.config/canvass/config.toml`).
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("canvass")
        .join("config.toml")
}
