//! Study controllers
//!
//! A controller owns a study session and the store it draws cards from, and
//! turns user actions into store and session operations. Whatever shows the
//! result to the user implements [`Presenter`]; controllers call
//! `render` after every action and `confirm` before anything destructive.

pub mod deck_study;
pub mod set_study;

pub use deck_study::{describe_start_error, DeckStudyApp};
pub use set_study::SetStudyApp;

use crate::error::{FlashdeckError, FlashdeckResult};
use crate::session::{SessionEngine, SessionSnapshot, Shuffle};

/// Everything needed to draw the study view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudySnapshot {
    /// Selected set name or deck file path
    pub source: Option<String>,
    pub session: SessionSnapshot,
    /// Unsaved changes exist (flat-file decks only)
    pub dirty: bool,
}

/// Display side of the study tool
pub trait Presenter {
    /// Draw the current state
    fn render(&mut self, state: &StudySnapshot);

    /// Ask a yes/no question before a destructive action
    fn confirm(&mut self, question: &str) -> bool;

    /// Show a one-off message
    fn notify(&mut self, message: &str);
}

/// Actions shared by both controllers
pub trait StudyControls {
    type Presenter: Presenter;

    fn session_mut(&mut self) -> &mut SessionEngine;

    fn presenter_mut(&mut self) -> &mut Self::Presenter;

    fn snapshot(&self) -> StudySnapshot;

    /// Start a fresh session from the current source
    fn restart(&mut self) -> FlashdeckResult<()>;

    /// Add a card to the current source
    fn add_card(&mut self, term: &str, definition: &str) -> FlashdeckResult<()>;

    /// Persist pending changes
    fn save(&mut self) -> FlashdeckResult<()>;

    /// Switch to another set or deck file
    fn open_source(&mut self, identifier: &str) -> FlashdeckResult<()>;

    /// Delete the current source after confirmation
    fn delete_source(&mut self) -> FlashdeckResult<()> {
        Err(FlashdeckError::Validation(
            "Only sets can be deleted while studying".into(),
        ))
    }

    /// Whether the user may leave now
    fn request_exit(&mut self) -> bool {
        true
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.presenter_mut().render(&snapshot);
    }

    fn flip(&mut self) {
        self.session_mut().reveal();
        self.render();
    }

    fn next(&mut self) {
        if self.session_mut().is_active() && !self.session_mut().advance().has_next {
            self.presenter_mut()
                .notify("That was the last card. Shuffle to study the deck again.");
        }
        self.render();
    }

    fn previous(&mut self) {
        self.session_mut().previous();
        self.render();
    }

    fn shuffle(&mut self) {
        match self.session_mut().reshuffle() {
            Shuffle::Shuffled => self.presenter_mut().notify("Cards have been shuffled!"),
            Shuffle::NothingToShuffle => self.presenter_mut().notify("No cards to shuffle."),
        }
        self.render();
    }
}
