//! Set service
//!
//! Business logic for named card sets: validation, implicit set creation,
//! deletion policy, audit logging, and moving cards between the set
//! database and deck files.

use std::collections::BTreeMap;
use std::path::Path;

use crate::audit::EntityType;
use crate::error::{FlashdeckError, FlashdeckResult};
use crate::models::{AddedCard, Card, CardId, CardRecord, CardSet, SetId};
use crate::storage::{load_deck, save_deck, LoadStatus, Storage};

/// A set with its card count, for listings
#[derive(Debug, Clone)]
pub struct SetSummary {
    pub set: CardSet,
    pub card_count: usize,
}

/// Outcome of deleting a set
#[derive(Debug, Clone)]
pub struct DeletedSet {
    pub set: CardSet,
    /// Cards deleted along with the set
    pub cards_removed: usize,
    /// Cards left in the database without a set
    pub cards_orphaned: usize,
}

/// Outcome of importing a deck file into a set
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub set_id: SetId,
    pub set_created: bool,
    pub cards_added: usize,
    pub status: LoadStatus,
}

/// Service for set management
pub struct SetService<'a> {
    storage: &'a Storage,
}

impl<'a> SetService<'a> {
    /// Create a new set service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an empty set
    pub fn create_set(&self, name: &str) -> FlashdeckResult<CardSet> {
        let id = self.storage.sets.create_set(name)?;
        let set = CardSet {
            id,
            name: name.trim().to_string(),
        };

        self.storage
            .log_create(EntityType::Set, id.to_string(), Some(set.name.clone()), &set);

        Ok(set)
    }

    /// Add a card under a set name, creating the set when it's new
    pub fn add_card(&self, set_name: &str, term: &str, definition: &str) -> FlashdeckResult<AddedCard> {
        let added = self.storage.sets.add_card(set_name, term, definition)?;

        if added.set_created {
            let set = CardSet {
                id: added.set_id,
                name: set_name.trim().to_string(),
            };
            self.storage.log_create(
                EntityType::Set,
                set.id.to_string(),
                Some(set.name.clone()),
                &set,
            );
        }

        // The card is committed; a failed read only costs the audit entry
        match self.storage.sets.get_card(added.card_id) {
            Ok(Some(record)) => self.storage.log_create(
                EntityType::Card,
                record.id.to_string(),
                Some(record.card.term.clone()),
                &record,
            ),
            Ok(None) => {}
            Err(e) => log::warn!("Failed to read back {}: {}", added.card_id, e),
        }

        Ok(added)
    }

    /// Find a set by exact name, falling back to a `set-<n>` key
    pub fn find_set(&self, identifier: &str) -> FlashdeckResult<Option<CardSet>> {
        let identifier = identifier.trim();

        if let Some(id) = self.storage.sets.set_id_by_name(identifier)? {
            return self.storage.sets.get_set(id);
        }

        if let Ok(id) = identifier.parse::<SetId>() {
            return self.storage.sets.get_set(id);
        }

        Ok(None)
    }

    /// Find a set or fail with a not-found error
    pub fn require_set(&self, identifier: &str) -> FlashdeckResult<CardSet> {
        self.find_set(identifier)?
            .ok_or_else(|| FlashdeckError::set_not_found(identifier.trim()))
    }

    pub fn get_set(&self, id: SetId) -> FlashdeckResult<Option<CardSet>> {
        self.storage.sets.get_set(id)
    }

    /// All sets as a name → key map
    pub fn list_sets(&self) -> FlashdeckResult<BTreeMap<String, SetId>> {
        self.storage.sets.list_sets()
    }

    /// All sets with card counts, in creation order
    pub fn summaries(&self) -> FlashdeckResult<Vec<SetSummary>> {
        self.storage
            .sets
            .all_sets()?
            .into_iter()
            .map(|set| {
                let card_count = self.storage.sets.card_count(set.id)?;
                Ok(SetSummary { set, card_count })
            })
            .collect()
    }

    /// Cards of a set in insertion order
    pub fn cards(&self, set_id: SetId) -> FlashdeckResult<Vec<Card>> {
        self.storage.sets.list_cards(set_id)
    }

    pub fn card_records(&self, set_id: SetId) -> FlashdeckResult<Vec<CardRecord>> {
        self.storage.sets.list_card_records(set_id)
    }

    /// Delete a set, following the configured cascade policy
    ///
    /// The caller is responsible for ending any session or selection that
    /// still refers to the set.
    pub fn delete_set(&self, set_id: SetId) -> FlashdeckResult<DeletedSet> {
        let set = self
            .storage
            .sets
            .get_set(set_id)?
            .ok_or_else(|| FlashdeckError::set_not_found(set_id.to_string()))?;

        let card_count = self.storage.sets.card_count(set_id)?;
        let cascade = self.storage.settings().cascade_set_delete;

        let cards_removed = self.storage.sets.delete_set(set_id, cascade)?;
        let cards_orphaned = card_count - cards_removed;

        if cards_orphaned > 0 {
            log::warn!(
                "Deleted set '{}' but kept its {} cards (cascade_set_delete is off)",
                set.name,
                cards_orphaned
            );
        }

        let note = if cascade {
            format!("{} cards deleted", cards_removed)
        } else {
            format!("{} cards kept without a set", cards_orphaned)
        };
        self.storage.log_delete(
            EntityType::Set,
            set.id.to_string(),
            Some(set.name.clone()),
            &set,
            Some(note),
        );

        Ok(DeletedSet {
            set,
            cards_removed,
            cards_orphaned,
        })
    }

    /// Delete a single card by key
    pub fn delete_card(&self, card_id: CardId) -> FlashdeckResult<CardRecord> {
        let record = self
            .storage
            .sets
            .get_card(card_id)?
            .ok_or_else(|| FlashdeckError::card_not_found(card_id.to_string()))?;

        self.storage.sets.delete_card(card_id)?;

        self.storage.log_delete(
            EntityType::Card,
            record.id.to_string(),
            Some(record.card.term.clone()),
            &record,
            None,
        );

        Ok(record)
    }

    /// Cards left behind by non-cascading set deletes
    pub fn orphaned_card_count(&self) -> FlashdeckResult<usize> {
        self.storage.sets.orphaned_card_count()
    }

    /// Write a set's cards to a deck file
    pub fn export_set(&self, set_id: SetId, path: &Path) -> FlashdeckResult<usize> {
        let cards = self.cards(set_id)?;
        let settings = self.storage.settings();

        save_deck(path, &cards, &settings.separator, settings.atomic_save)?;
        log::info!("Exported {} cards to {}", cards.len(), path.display());

        Ok(cards.len())
    }

    /// Add every card of a deck file to a set, creating the set if needed
    ///
    /// The set and all of its new cards are written in one transaction, so
    /// a failure part-way adds nothing.
    pub fn import_deck(&self, set_name: &str, path: &Path) -> FlashdeckResult<ImportSummary> {
        let loaded = load_deck(path, &self.storage.settings().separator)?;
        let added = self.storage.sets.add_cards(set_name, &loaded.cards)?;

        if added.set_created {
            let set = CardSet {
                id: added.set_id,
                name: set_name.trim().to_string(),
            };
            self.storage.log_create(
                EntityType::Set,
                set.id.to_string(),
                Some(set.name.clone()),
                &set,
            );
        }

        for (card_id, card) in added.card_ids.iter().zip(&loaded.cards) {
            let record = CardRecord {
                id: *card_id,
                set_id: added.set_id,
                card: card.clone(),
            };
            self.storage.log_create(
                EntityType::Card,
                card_id.to_string(),
                Some(card.term.clone()),
                &record,
            );
        }

        Ok(ImportSummary {
            set_id: added.set_id,
            set_created: added.set_created,
            cards_added: added.card_ids.len(),
            status: loaded.status,
        })
    }
}
