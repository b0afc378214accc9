//! Storage layer for flashdeck
//!
//! Two independent backends share the card model:
//!
//! - `database`: named sets of cards in SQLite, committed on every change
//! - `deck_file`: a single deck in a delimited text file, saved on request
//!
//! `Storage` bundles the set database with the audit log; flat-file decks
//! are opened separately because their path is chosen per command.

pub mod database;
pub mod deck_file;
pub mod file_io;
pub mod init;
pub mod schema;

pub use database::SetDatabase;
pub use deck_file::{load_deck, parse_deck, render_deck, save_deck, DeckFile, DeckLoad, LoadStatus};
pub use file_io::{read_text, write_text_atomic};
pub use init::initialize_storage;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FlashdeckPaths;
use crate::config::settings::Settings;
use crate::error::FlashdeckError;

/// Main storage coordinator
pub struct Storage {
    paths: FlashdeckPaths,
    settings: Settings,
    pub sets: SetDatabase,
    audit: AuditLogger,
}

impl Storage {
    /// Open storage under the given paths
    pub fn new(paths: FlashdeckPaths, settings: Settings) -> Result<Self, FlashdeckError> {
        paths.ensure_directories()?;

        Ok(Self {
            sets: SetDatabase::open(&paths.database_file())?,
            audit: AuditLogger::new(paths.audit_log()),
            settings,
            paths,
        })
    }

    /// Storage with an in-memory set database (useful for testing)
    ///
    /// The audit log still goes to disk under `paths`.
    pub fn in_memory(paths: FlashdeckPaths, settings: Settings) -> Result<Self, FlashdeckError> {
        paths.ensure_directories()?;

        Ok(Self {
            sets: SetDatabase::open_in_memory()?,
            audit: AuditLogger::new(paths.audit_log()),
            settings,
            paths,
        })
    }

    pub fn paths(&self) -> &FlashdeckPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Open the deck file named in settings (or the default one)
    pub fn open_default_deck(&self) -> DeckFile {
        DeckFile::with_settings(self.settings.deck_path(&self.paths), &self.settings)
    }

    /// Record a created entity in the audit log
    ///
    /// Audit writes happen after the change is committed, so a failed write
    /// is logged and otherwise ignored.
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.record(AuditEntry::create(entity_type, entity_id, entity_name, entity));
    }

    /// Record a deleted entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
        note: Option<String>,
    ) {
        let mut entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        if let Some(note) = note {
            entry = entry.with_note(note);
        }
        self.record(entry);
    }

    /// Record a deck save in the audit log
    pub fn log_save(&self, deck: &DeckFile) {
        self.record(AuditEntry::save(deck.path().display().to_string(), deck.len()));
    }

    fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            log::warn!(
                "Failed to write audit entry for {} {}: {}",
                entry.entity_type,
                entry.entity_id,
                e
            );
        }
    }
}
