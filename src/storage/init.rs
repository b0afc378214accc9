//! Storage initialization
//!
//! Handles first-run setup: directories, settings file, and database schema.

use crate::config::paths::FlashdeckPaths;
use crate::config::settings::Settings;
use crate::error::FlashdeckError;

use super::database::SetDatabase;

/// Initialize storage for a fresh installation
///
/// Existing settings and data are left untouched.
pub fn initialize_storage(paths: &FlashdeckPaths) -> Result<(), FlashdeckError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        Settings::default().save(paths)?;
    }

    // Opening the database creates the tables
    SetDatabase::open(&paths.database_file())?;

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FlashdeckPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.settings_file().exists());
        assert!(paths.database_file().exists());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.separator = "---".into();
        settings.save(&paths).unwrap();

        let db = SetDatabase::open(&paths.database_file()).unwrap();
        db.create_set("Spanish").unwrap();
        drop(db);

        initialize_storage(&paths).unwrap();

        assert_eq!(Settings::load_or_create(&paths).unwrap().separator, "---");
        let db = SetDatabase::open(&paths.database_file()).unwrap();
        assert_eq!(db.list_sets().unwrap().len(), 1);
    }
}
