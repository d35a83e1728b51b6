//! Machine configuration for WindKit
//!
//! Describes the fixed geometry of a two-axis filament winder: the mandrel
//! being wound and the travel limit of the carriage. Supports JSON and TOML
//! files, selected by extension.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed geometry of the winder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Mandrel diameter (in)
    pub mandrel_diameter: f64,
    /// Mandrel length (in)
    pub mandrel_length: f64,
    /// Maximum carriage travel along X (in); X is confined to `[0, x_limit]`
    pub x_limit: f64,
}

impl MachineConfig {
    /// Create a config from explicit geometry
    pub fn new(mandrel_diameter: f64, mandrel_length: f64, x_limit: f64) -> Self {
        Self {
            mandrel_diameter,
            mandrel_length,
            x_limit,
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
            }
        };

        config.validate()?;
        tracing::debug!(
            "Loaded machine config from {}: diameter {} length {} x_limit {}",
            path.display(),
            config.mandrel_diameter,
            config.mandrel_length,
            config.x_limit
        );
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
            _ => {
                return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let checks = [
            ("mandrel_diameter", self.mandrel_diameter),
            ("mandrel_length", self.mandrel_length),
            ("x_limit", self.x_limit),
        ];

        for (key, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
