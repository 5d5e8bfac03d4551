use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration, stored on disk as TOML.
///
/// Every field has a compiled-in default, so a missing (or partial)
/// config file is not an error. The entry point loads this once and
/// passes resolved values into the fetch operations; nothing in the
/// fetch path reaches for defaults on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City used when no `--city` flag is given.
    pub default_city: String,

    /// Language code for localized description strings.
    pub lang: String,

    /// Weather service endpoint.
    pub base_url: String,

    /// Where the raw JSON payload is written, relative to the working directory.
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: "Новосибирск".to_string(),
            lang: "ru".to_string(),
            base_url: "https://wttr.in".to_string(),
            data_file: PathBuf::from("data.txt"),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("in", "wttr", "wttr-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
