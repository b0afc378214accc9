//! Studying named sets from the set database

use crate::error::{FlashdeckError, FlashdeckResult};
use crate::models::{AddedCard, CardSet};
use crate::services::{DeletedSet, SetService};
use crate::session::SessionEngine;
use crate::storage::Storage;

use super::{Presenter, StudyControls, StudySnapshot};

/// Controller for the set database
pub struct SetStudyApp<'a, P: Presenter> {
    service: SetService<'a>,
    session: SessionEngine,
    selected: Option<CardSet>,
    presenter: P,
}

impl<'a, P: Presenter> SetStudyApp<'a, P> {
    pub fn new(storage: &'a Storage, presenter: P) -> Self {
        Self {
            service: SetService::new(storage),
            session: SessionEngine::from_seed_option(storage.settings().shuffle_seed),
            selected: None,
            presenter,
        }
    }

    /// Replace the session engine (e.g. with a seeded one)
    pub fn with_session(mut self, session: SessionEngine) -> Self {
        self.session = session;
        self
    }

    pub fn service(&self) -> &SetService<'a> {
        &self.service
    }

    pub fn selected(&self) -> Option<&CardSet> {
        self.selected.as_ref()
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

    pub fn create_set(&mut self, name: &str) -> FlashdeckResult<CardSet> {
        let set = self.service.create_set(name)?;
        self.render();
        Ok(set)
    }

    /// Add a card under a set name; the running session is not changed
    pub fn add_card_to(&mut self, set_name: &str, term: &str, definition: &str) -> FlashdeckResult<AddedCard> {
        let added = self.service.add_card(set_name, term, definition)?;
        if added.set_created {
            self.presenter
                .notify(&format!("Created set '{}'", set_name.trim()));
        }
        self.render();
        Ok(added)
    }

    /// Select a set and start studying it
    ///
    /// Any previous session ends. An empty set stays selected with no
    /// session running.
    pub fn select_set(&mut self, identifier: &str) -> FlashdeckResult<()> {
        let set = self.service.require_set(identifier)?;
        let cards = self.service.cards(set.id)?;

        self.session.end_session();
        self.selected = Some(set);

        if cards.is_empty() {
            self.presenter.notify("No cards in this set");
        } else {
            self.session.start_session(&cards)?;
        }

        self.render();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.session.end_session();
        self.render();
    }

    /// Delete the selected set after confirmation
    pub fn delete_selected_set(&mut self) -> FlashdeckResult<Option<DeletedSet>> {
        match self.selected.as_ref() {
            Some(set) => {
                let identifier = set.id.to_string();
                self.delete_set(&identifier)
            }
            None => Ok(None),
        }
    }

    /// Delete a set after confirmation, clearing it from the study view
    ///
    /// Returns `None` when the user declines.
    pub fn delete_set(&mut self, identifier: &str) -> FlashdeckResult<Option<DeletedSet>> {
        let set = self.service.require_set(identifier)?;

        let question = format!("Are you sure you want to delete the \"{}\" set?", set.name);
        if !self.presenter.confirm(&question) {
            return Ok(None);
        }

        let deleted = self.service.delete_set(set.id)?;

        if self.selected.as_ref().map(|s| s.id) == Some(set.id) {
            self.selected = None;
            self.session.end_session();
        }

        self.render();
        Ok(Some(deleted))
    }
}

impl<'a, P: Presenter> StudyControls for SetStudyApp<'a, P> {
    type Presenter = P;

    fn session_mut(&mut self) -> &mut SessionEngine {
        &mut self.session
    }

    fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn snapshot(&self) -> StudySnapshot {
        StudySnapshot {
            source: self.selected.as_ref().map(|s| s.name.clone()),
            session: self.session.snapshot(),
            dirty: false,
        }
    }

    fn restart(&mut self) -> FlashdeckResult<()> {
        let set = self
            .selected
            .clone()
            .ok_or_else(|| FlashdeckError::Validation("No set selected".into()))?;
        self.select_set(&set.id.to_string())
    }

    fn add_card(&mut self, term: &str, definition: &str) -> FlashdeckResult<()> {
        let set = self
            .selected
            .clone()
            .ok_or_else(|| FlashdeckError::Validation("No set selected".into()))?;
        self.add_card_to(&set.name, term, definition)?;
        Ok(())
    }

    fn save(&mut self) -> FlashdeckResult<()> {
        // Every change is already committed
        self.presenter.notify("Sets are saved automatically.");
        Ok(())
    }

    fn open_source(&mut self, identifier: &str) -> FlashdeckResult<()> {
        self.select_set(identifier)
    }

    fn delete_source(&mut self) -> FlashdeckResult<()> {
        if self.selected.is_none() {
            return Err(FlashdeckError::Validation("No set selected".into()));
        }
        if let Some(deleted) = self.delete_selected_set()? {
            self.presenter
                .notify(&format!("Deleted set '{}'", deleted.set.name));
        }
        Ok(())
    }
}
