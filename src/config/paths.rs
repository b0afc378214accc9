//! Path management for flashdeck
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `FLASHDECK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/flashdeck` or `~/.config/flashdeck`
//! 3. Windows: `%APPDATA%\flashdeck`

use std::path::PathBuf;

use crate::error::FlashdeckError;

/// Manages all paths used by flashdeck
#[derive(Debug, Clone)]
pub struct FlashdeckPaths {
    /// Base directory for all flashdeck data
    base_dir: PathBuf,
}

impl FlashdeckPaths {
    /// Create a new FlashdeckPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FlashdeckError> {
        let base_dir = if let Ok(custom) = std::env::var("FLASHDECK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FlashdeckPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/flashdeck/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/flashdeck/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the SQLite database holding sets and cards
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("flashcards.db")
    }

    /// Get the path to the default flat-file deck
    pub fn deck_file(&self) -> PathBuf {
        self.data_dir().join("deck.txt")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FlashdeckError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FlashdeckError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FlashdeckError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if flashdeck has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FlashdeckError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join("flashdeck"));
    }

    let home = std::env::var("HOME")
        .map_err(|_| FlashdeckError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("flashdeck"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FlashdeckError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FlashdeckError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("flashdeck"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("FLASHDECK_DATA_DIR", custom_path);

        let paths = FlashdeckPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var("FLASHDECK_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.database_file(),
            temp_dir.path().join("data").join("flashcards.db")
        );
        assert_eq!(
            paths.deck_file(),
            temp_dir.path().join("data").join("deck.txt")
        );
    }
}
