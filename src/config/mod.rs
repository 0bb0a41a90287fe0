use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::audio::DeviceKind;
use crate::priority::PriorityPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Device kinds to prefer, highest priority first. Kinds not listed keep
    /// their default relative order after the listed ones. An empty list uses
    /// the built-in default order.
    #[serde(default)]
    pub preferred_devices: Vec<DeviceKind>,
}

// Unknown keys under [general] are rejected so a preferred_devices list
// misplaced below the table header fails loudly instead of being dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    pub log_level: String,
    pub logging_enabled: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            logging_enabled: true,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = match config_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_path()?,
        };

        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            info!("Configuration file not found, creating default configuration");
            return Self::create_default_config(&path);
        }

        let config_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    pub fn save(&self, config_path: Option<&str>) -> Result<()> {
        let path = match config_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_path()?,
        };

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(&path, config_content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Surface configuration errors early; the same validation runs again at
    /// switch construction.
    pub fn validate(&self) -> Result<()> {
        PriorityPolicy::resolve(&self.preferred_devices)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;

        Ok(home_dir.join(".config/audio-device-switch/config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<Self> {
        let config = Config::default();

        // Try to create parent directories, but don't fail if we can't
        // This handles cases where the path is invalid or we don't have permissions
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(
                    "Could not create config directory {}: {}. Using default config without saving.",
                    parent.display(),
                    e
                );
                return Ok(config);
            }
        }

        // Try to save the config, but don't fail if we can't
        if let Err(e) = config.save(path.to_str()) {
            warn!(
                "Could not save default config to {}: {}. Using default config.",
                path.display(),
                e
            );
            return Ok(config);
        }

        info!("Created default configuration file: {}", path.display());
        Ok(config)
    }
}
