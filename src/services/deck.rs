//! Deck service
//!
//! Business logic for the flat-file deck: load with warnings, duplicate-safe
//! adds, explicit saves, and audit logging.

use std::path::PathBuf;

use crate::audit::EntityType;
use crate::error::FlashdeckResult;
use crate::models::Card;
use crate::storage::{DeckFile, LoadStatus, Storage};

/// Service for a single flat-file deck
pub struct DeckService<'a> {
    storage: &'a Storage,
    deck: DeckFile,
}

impl<'a> DeckService<'a> {
    /// Bind to the deck file from settings without reading it yet
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            deck: storage.open_default_deck(),
            storage,
        }
    }

    /// Bind to a specific deck file without reading it yet
    pub fn at_path(storage: &'a Storage, path: PathBuf) -> Self {
        Self {
            deck: DeckFile::with_settings(path, storage.settings()),
            storage,
        }
    }

    /// Bind to `path` (or the settings deck) and load it
    pub fn open(storage: &'a Storage, path: Option<PathBuf>) -> FlashdeckResult<(Self, LoadStatus)> {
        let mut service = match path {
            Some(path) => Self::at_path(storage, path),
            None => Self::new(storage),
        };
        let status = service.load()?;
        Ok((service, status))
    }

    /// Re-read the bound file, discarding unsaved changes
    pub fn load(&mut self) -> FlashdeckResult<LoadStatus> {
        let status = self.deck.load()?;
        log::info!(
            "Loaded {} cards from {}",
            self.deck.len(),
            self.deck.path().display()
        );
        Ok(status)
    }

    /// Switch to another deck file and load it
    ///
    /// If the load fails the current cards and path are kept.
    pub fn load_from(&mut self, path: PathBuf) -> FlashdeckResult<LoadStatus> {
        let mut next = DeckFile::with_settings(path, self.storage.settings());
        let status = next.load()?;
        self.deck = next;
        Ok(status)
    }

    pub fn add_card(&mut self, term: &str, definition: &str) -> FlashdeckResult<Card> {
        let card = self.deck.add_card(term, definition)?;
        self.storage.log_create(
            EntityType::Card,
            card.term.clone(),
            Some(self.deck.path().display().to_string()),
            &card,
        );
        Ok(card)
    }

    pub fn remove_card(&mut self, term: &str) -> FlashdeckResult<Card> {
        let card = self.deck.remove_card(term)?;
        self.storage.log_delete(
            EntityType::Card,
            card.term.clone(),
            Some(self.deck.path().display().to_string()),
            &card,
            None,
        );
        Ok(card)
    }

    /// Write the deck to its file
    pub fn save(&mut self) -> FlashdeckResult<()> {
        self.deck.save()?;
        self.storage.log_save(&self.deck);
        Ok(())
    }

    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn deck(&self) -> &DeckFile {
        &self.deck
    }

    pub fn is_dirty(&self) -> bool {
        self.deck.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::FlashdeckPaths;
    use crate::config::settings::Settings;
    use crate::error::FlashdeckError;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::in_memory(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_open_missing_deck() {
        let (_temp_dir, storage) = create_test_storage();
        let (service, status) = DeckService::open(&storage, None).unwrap();

        assert_eq!(status, LoadStatus::Missing);
        assert!(service.cards().is_empty());
        assert_eq!(service.deck().path(), storage.paths().deck_file());
    }

    #[test]
    fn test_add_save_reopen() {
        let (_temp_dir, storage) = create_test_storage();
        let mut service = DeckService::new(&storage);

        service.add_card("Cat", "A small animal").unwrap();
        service.add_card("Dog", "").unwrap();
        assert!(service.is_dirty());

        service.save().unwrap();
        assert!(!service.is_dirty());

        let (reopened, status) = DeckService::open(&storage, None).unwrap();
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(reopened.cards(), service.cards());

        let last = storage.audit().read_recent(1).unwrap();
        assert_eq!(last[0].operation, Operation::Save);
    }

    #[test]
    fn test_duplicate_leaves_deck_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let mut service = DeckService::new(&storage);
        service.add_card("Cat", "meow").unwrap();

        assert!(matches!(
            service.add_card("cat", "purr"),
            Err(FlashdeckError::Duplicate { .. })
        ));
        assert_eq!(service.cards().len(), 1);
        assert_eq!(service.cards()[0].definition, "meow");
    }

    #[test]
    fn test_load_from_failure_keeps_current_deck() {
        let (temp_dir, storage) = create_test_storage();
        let mut service = DeckService::new(&storage);
        service.add_card("Cat", "meow").unwrap();

        let dir_path = temp_dir.path().join("a-directory");
        std::fs::create_dir(&dir_path).unwrap();

        assert!(service.load_from(dir_path).is_err());
        assert_eq!(service.cards().len(), 1);
        assert!(service.is_dirty());
        assert_eq!(service.deck().path(), storage.paths().deck_file());
    }

    #[test]
    fn test_remove_card() {
        let (_temp_dir, storage) = create_test_storage();
        let mut service = DeckService::new(&storage);
        service.add_card("Cat", "meow").unwrap();
        service.save().unwrap();

        service.remove_card("CAT").unwrap();
        assert!(service.cards().is_empty());
        assert!(service.is_dirty());
    }

    #[test]
    fn test_audit_failure_does_not_fail_changes() {
        let (_temp_dir, storage) = create_test_storage();
        std::fs::create_dir(storage.paths().audit_log()).unwrap();
        let mut service = DeckService::new(&storage);

        let card = service.add_card("Cat", "meow").unwrap();
        assert_eq!(card.term, "Cat");
        assert_eq!(service.cards().len(), 1);

        service.save().unwrap();
        assert!(!service.is_dirty());
        assert!(storage.paths().deck_file().exists());

        service.remove_card("cat").unwrap();
        assert!(service.cards().is_empty());
    }
}
