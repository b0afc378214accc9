//! User settings for flashdeck
//!
//! Manages user preferences for the flat-file format, save behavior,
//! set deletion, and session shuffling.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::FlashdeckPaths;
use crate::error::FlashdeckError;

/// Separator line written between cards in a flat-file deck
pub const DEFAULT_SEPARATOR: &str = "%%%";

/// User settings for flashdeck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Token on its own line that terminates a card in a deck file
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Write deck files to a temp file and rename over the destination
    #[serde(default = "default_atomic_save")]
    pub atomic_save: bool,

    /// Remove a set's cards along with the set
    #[serde(default)]
    pub cascade_set_delete: bool,

    /// Fixed shuffle seed for reproducible study sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,

    /// Deck file used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_atomic_save() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            separator: default_separator(),
            atomic_save: default_atomic_save(),
            cascade_set_delete: false,
            shuffle_seed: None,
            deck_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FlashdeckPaths) -> Result<Self, FlashdeckError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FlashdeckError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            FlashdeckError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FlashdeckPaths) -> Result<(), FlashdeckError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FlashdeckError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FlashdeckError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that the separator can be written as a line of its own
    pub fn validate(&self) -> Result<(), FlashdeckError> {
        let sep = &self.separator;
        if sep.is_empty() {
            return Err(FlashdeckError::Config("separator cannot be empty".into()));
        }
        if sep.contains('\n') || sep.contains('\r') {
            return Err(FlashdeckError::Config(
                "separator must fit on a single line".into(),
            ));
        }
        if sep.trim() != sep {
            return Err(FlashdeckError::Config(format!(
                "separator '{}' has surrounding whitespace",
                sep
            )));
        }
        Ok(())
    }

    /// The deck file to use, honoring the configured override
    pub fn deck_path(&self, paths: &FlashdeckPaths) -> PathBuf {
        self.deck_file.clone().unwrap_or_else(|| paths.deck_file())
    }
}
