use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{controller::StartupCity, model::WeatherUnit, provider::ProviderId};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// unit = "imperial"
/// startup = "default"
/// compress_unit = true
/// provider = "sample"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit system for every displayed temperature.
    pub unit: WeatherUnit,

    /// City selected once the catalog has loaded.
    pub startup: StartupCity,

    /// Use the short `°` suffix on the headline temperature.
    pub compress_unit: bool,

    /// Optional forecast provider id, e.g. "sample".
    pub provider: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: WeatherUnit::default(),
            startup: StartupCity::default(),
            compress_unit: true,
            provider: None,
        }
    }
}

impl Config {
    /// Return the configured provider, falling back to the sample data.
    pub fn provider_id(&self) -> Result<ProviderId> {
        match self.provider.as_deref() {
            Some(id) => ProviderId::try_from(id),
            None => Ok(ProviderId::Sample),
        }
    }

    pub fn set_provider(&mut self, id: ProviderId) {
        self.provider = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherfy", "weatherfy")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
