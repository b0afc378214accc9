//! Studying a single flat-file deck

use std::path::PathBuf;

use crate::error::{FlashdeckError, FlashdeckResult};
use crate::models::Card;
use crate::services::DeckService;
use crate::session::SessionEngine;
use crate::storage::{LoadStatus, Storage};

use super::{Presenter, StudyControls, StudySnapshot};

const NO_CARDS_WARNING: &str = "The file was read but no cards could be found in it.";

/// Controller for a flat-file deck
pub struct DeckStudyApp<'a, P: Presenter> {
    service: DeckService<'a>,
    session: SessionEngine,
    presenter: P,
}

impl<'a, P: Presenter> DeckStudyApp<'a, P> {
    /// Load the deck at `path` (or the configured deck) and show it
    pub fn open(storage: &'a Storage, path: Option<PathBuf>, presenter: P) -> FlashdeckResult<Self> {
        let (service, status) = DeckService::open(storage, path)?;
        let mut app = Self {
            service,
            session: SessionEngine::from_seed_option(storage.settings().shuffle_seed),
            presenter,
        };
        app.report_load(status);
        app.render();
        Ok(app)
    }

    /// Replace the session engine (e.g. with a seeded one)
    pub fn with_session(mut self, session: SessionEngine) -> Self {
        self.session = session;
        self
    }

    pub fn service(&self) -> &DeckService<'a> {
        &self.service
    }

    pub fn session(&self) -> &SessionEngine {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn is_dirty(&self) -> bool {
        self.service.is_dirty()
    }

    fn report_load(&mut self, status: LoadStatus) {
        if status.is_warning() {
            self.presenter.notify(NO_CARDS_WARNING);
        }
    }

    /// Start a session over the current cards
    pub fn start_session(&mut self) -> FlashdeckResult<()> {
        let cards = self.service.cards().to_vec();
        self.session.start_session(&cards)?;
        self.render();
        Ok(())
    }

    /// Add a card; a running session keeps its own copy of the deck
    pub fn add(&mut self, term: &str, definition: &str) -> FlashdeckResult<Card> {
        let card = self.service.add_card(term, definition)?;
        self.render();
        Ok(card)
    }

    pub fn remove_card(&mut self, term: &str) -> FlashdeckResult<Card> {
        let card = self.service.remove_card(term)?;
        self.render();
        Ok(card)
    }

    /// Load another deck file (or reload the current one)
    ///
    /// Unsaved changes are only thrown away after confirmation. Returns
    /// `None` when the user declines.
    pub fn load(&mut self, path: Option<PathBuf>) -> FlashdeckResult<Option<LoadStatus>> {
        if self.service.is_dirty() && !self.presenter.confirm("Discard unsaved changes and load?") {
            return Ok(None);
        }

        let status = match path {
            Some(path) => self.service.load_from(path)?,
            None => self.service.load()?,
        };

        self.session.end_session();
        self.report_load(status);
        self.render();
        Ok(Some(status))
    }
}

impl<'a, P: Presenter> StudyControls for DeckStudyApp<'a, P> {
    type Presenter = P;

    fn session_mut(&mut self) -> &mut SessionEngine {
        &mut self.session
    }

    fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn snapshot(&self) -> StudySnapshot {
        StudySnapshot {
            source: Some(self.service.deck().path().display().to_string()),
            session: self.session.snapshot(),
            dirty: self.service.is_dirty(),
        }
    }

    fn restart(&mut self) -> FlashdeckResult<()> {
        self.start_session()
    }

    fn add_card(&mut self, term: &str, definition: &str) -> FlashdeckResult<()> {
        self.add(term, definition)?;
        Ok(())
    }

    fn save(&mut self) -> FlashdeckResult<()> {
        self.service.save()?;
        self.presenter.notify(&format!(
            "Saved {} cards to {}",
            self.service.cards().len(),
            self.service.deck().path().display()
        ));
        self.render();
        Ok(())
    }

    fn open_source(&mut self, identifier: &str) -> FlashdeckResult<()> {
        self.load(Some(PathBuf::from(identifier)))?;
        Ok(())
    }

    /// Unsaved changes are either saved or explicitly discarded
    fn request_exit(&mut self) -> bool {
        if !self.service.is_dirty() {
            return true;
        }

        if self.presenter.confirm("Save changes before exiting?") {
            return match StudyControls::save(self) {
                Ok(()) => true,
                Err(e) => {
                    self.presenter.notify(&format!("Save failed: {}", e));
                    false
                }
            };
        }

        self.presenter.confirm("Discard unsaved changes and exit?")
    }
}

/// Message for a session that cannot start
pub fn describe_start_error(error: &FlashdeckError) -> String {
    match error {
        FlashdeckError::EmptyDeck => "Add some cards before studying.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::RecordingPresenter;
    use crate::config::paths::FlashdeckPaths;
    use crate::config::settings::Settings;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::in_memory(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn open<'a>(storage: &'a Storage, answers: &[bool]) -> DeckStudyApp<'a, RecordingPresenter> {
        DeckStudyApp::open(storage, None, RecordingPresenter::answering(answers))
            .unwrap()
            .with_session(SessionEngine::with_seed(3))
    }

    #[test]
    fn test_open_missing_file() {
        let (_temp_dir, storage) = create_test_storage();
        let app = open(&storage, &[]);

        assert!(app.service().cards().is_empty());
        assert!(app.presenter().messages.is_empty());
        assert!(!app.presenter().last().dirty);
    }

    #[test]
    fn test_open_unparseable_file_warns() {
        let (_temp_dir, storage) = create_test_storage();
        let deck_path = storage.paths().deck_file();
        fs::write(&deck_path, "%%%\n%%%\n").unwrap();

        let app = open(&storage, &[]);
        assert_eq!(app.presenter().messages, vec![NO_CARDS_WARNING]);
    }

    #[test]
    fn test_start_empty_deck() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[]);

        let err = app.start_session().unwrap_err();
        assert!(matches!(err, FlashdeckError::EmptyDeck));
        assert_eq!(
            describe_start_error(&err),
            "Add some cards before studying."
        );
    }

    #[test]
    fn test_add_marks_dirty_and_session_keeps_copy() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[]);
        app.add("Cat", "A small animal").unwrap();
        app.start_session().unwrap();

        app.add("Dog", "A bigger animal").unwrap();

        let state = app.presenter().last();
        assert!(state.dirty);
        assert_eq!(state.session.total, 1);
        assert_eq!(app.service().cards().len(), 2);
    }

    #[test]
    fn test_save_clears_dirty() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[]);
        app.add("Cat", "A small animal").unwrap();

        StudyControls::save(&mut app).unwrap();

        assert!(!app.is_dirty());
        assert!(!app.presenter().last().dirty);
        let text = fs::read_to_string(storage.paths().deck_file()).unwrap();
        assert_eq!(text, "Cat\nA small animal");
    }

    #[test]
    fn test_exit_clean_needs_no_confirmation() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[]);
        assert!(app.request_exit());
        assert!(app.presenter().questions.is_empty());
    }

    #[test]
    fn test_exit_dirty_save() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[true]);
        app.add("Cat", "meow").unwrap();

        assert!(app.request_exit());
        assert!(!app.is_dirty());
        assert!(storage.paths().deck_file().exists());
    }

    #[test]
    fn test_exit_blocked_when_save_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();

        let paths = FlashdeckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            deck_file: Some(blocker.join("deck.txt")),
            ..Settings::default()
        };
        let storage = Storage::in_memory(paths, settings).unwrap();

        let mut app = open(&storage, &[true]);
        app.add("Cat", "meow").unwrap();

        assert!(!app.request_exit());
        assert!(app.is_dirty());
        assert_eq!(app.presenter().questions, vec!["Save changes before exiting?"]);
        assert!(app
            .presenter()
            .messages
            .iter()
            .any(|m| m.starts_with("Save failed")));
    }

    #[test]
    fn test_exit_dirty_discard_and_cancel() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[false, false, false, true]);
        app.add("Cat", "meow").unwrap();

        assert!(!app.request_exit());
        assert!(app.is_dirty());

        assert!(app.request_exit());
        assert!(!storage.paths().deck_file().exists());
        assert_eq!(
            app.presenter().questions,
            vec![
                "Save changes before exiting?",
                "Discard unsaved changes and exit?",
                "Save changes before exiting?",
                "Discard unsaved changes and exit?",
            ]
        );
    }

    #[test]
    fn test_load_dirty_requires_confirmation() {
        let (temp_dir, storage) = create_test_storage();
        let other = temp_dir.path().join("other.txt");
        fs::write(&other, "Dog\nwoof").unwrap();

        let mut app = open(&storage, &[false, true]);
        app.add("Cat", "meow").unwrap();
        app.start_session().unwrap();

        assert!(app.load(Some(other.clone())).unwrap().is_none());
        assert_eq!(app.service().cards()[0].term, "Cat");
        assert!(app.session().is_active());

        let status = app.load(Some(other.clone())).unwrap();
        assert_eq!(status, Some(LoadStatus::Loaded));
        assert_eq!(app.service().cards()[0].term, "Dog");
        assert!(!app.session().is_active());
        assert_eq!(
            app.presenter().last().source,
            Some(other.display().to_string())
        );
    }

    #[test]
    fn test_delete_source_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[]);
        assert!(app.delete_source().unwrap_err().is_validation());
    }

    #[test]
    fn test_walk_and_reshuffle() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = open(&storage, &[]);
        app.add("A", "1").unwrap();
        app.add("B", "2").unwrap();
        app.restart().unwrap();

        app.next();
        app.next();
        assert!(app.presenter().last().session.finished);

        app.shuffle();
        let state = app.presenter().last();
        assert_eq!(state.session.position, Some(1));
        assert!(app
            .presenter()
            .messages
            .contains(&"Cards have been shuffled!".to_string()));
    }
}
