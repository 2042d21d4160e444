// core/src/utils/config.rs
use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use super::{logging, DEFAULT_GREETING};

/// Config file looked up in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "default.json";

/// JSON configuration shared by the daemon and the client.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub sock_path: String,
    #[serde(default)]
    pub log_path: Option<String>,
    #[serde(default = "default_bug_level")]
    pub bug_level: String,
    /// Read/write deadline for a call, 0 or absent disables it.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub greeting: Option<String>,
}

fn default_bug_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolves the config path, defaulting to `default.json` in the current directory.
    pub fn locate(config_override: Option<&str>) -> Result<PathBuf> {
        let config_path = match config_override {
            Some(path) => Path::new(path).to_path_buf(),
            None => env::current_dir()
                .context("Failed to get current directory")?
                .join(DEFAULT_CONFIG_FILE),
        };

        if !config_path.exists() {
            return Err(anyhow!("Config file not found at {}", config_path.display()));
        }
        Ok(config_path)
    }

    pub fn level(&self) -> LevelFilter {
        logging::parse_level(&self.bug_level)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis)
    }

    pub fn greeting(&self) -> &str {
        self.greeting.as_deref().unwrap_or(DEFAULT_GREETING)
    }
}
