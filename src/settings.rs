//! Host settings
//!
//! Persisted as JSON next to the binary. Missing fields take their defaults,
//! so an old settings file keeps working when new options are added.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stage::{CatalogError, StageCatalog};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid stage list: {0}")]
    Catalog(#[from] CatalogError),
}

/// Host settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Stage names in play order
    pub stages: Vec<String>,

    // === Debug view ===
    /// Draw restricted-area overlays
    pub show_restricted_areas: bool,

    /// Seed for the demo battlefield
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stages: StageCatalog::classic().iter().map(str::to_owned).collect(),
            show_restricted_areas: false,
            seed: 12345,
        }
    }
}

impl Settings {
    /// Default file name
    pub const FILE_NAME: &'static str = "tank_battle_settings.json";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from `path`
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Stage catalog built from `stages`
    pub fn catalog(&self) -> Result<StageCatalog, SettingsError> {
        Ok(StageCatalog::new(self.stages.iter().cloned())?)
    }
}
