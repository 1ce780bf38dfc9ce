use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_WEB_BASE_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub web_base_url: String,
    pub refresh_interval_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            refresh_interval_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs.max(5))
    }
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("groupstudy");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

const TEMPLATE: &str = r#"# groupstudy configuration
# The access token is kept in your OS credential manager, not here.

# Base URL of the study service API
api_base_url = "http://localhost:8080"

# Base URL of the web client, used to build shareable invite links
web_base_url = "http://localhost:5173"

# Seconds between automatic room list refreshes (minimum 5)
refresh_interval_secs = 30

# Log level for groupstudy.log in this directory (RUST_LOG overrides)
log_level = "info"
"#;

pub fn load_config() -> Result<Config> {
    load_config_from(&config_dir()?.join("config.toml"))
}

/// Reads the config at `path`, writing the commented template first if the
/// file does not exist. Missing keys fall back to defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        std::fs::write(path, TEMPLATE)
            .with_context(|| format!("Could not write {}", path.display()))?;
    }
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content).context("Invalid config file format")?;
    if config.api_base_url.trim().is_empty() {
        config.api_base_url = DEFAULT_API_BASE_URL.to_string();
    }
    if config.web_base_url.trim().is_empty() {
        config.web_base_url = DEFAULT_WEB_BASE_URL.to_string();
    }
    Ok(config)
}
