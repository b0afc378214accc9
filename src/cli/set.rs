//! Set CLI commands
//!
//! Implements CLI commands for the set database.

use std::path::PathBuf;

use clap::Subcommand;

use crate::app::SetStudyApp;
use crate::display::set::{format_set_details, format_set_list};
use crate::error::{FlashdeckError, FlashdeckResult};
use crate::models::CardId;
use crate::services::SetService;
use crate::session::SessionEngine;
use crate::storage::{LoadStatus, Storage};

use super::study::{run_study_loop, TerminalPresenter};

/// Set subcommands
#[derive(Subcommand)]
pub enum SetCommands {
    /// List all sets with their card counts
    List,

    /// Create an empty set
    Create {
        /// Set name
        name: String,
    },

    /// Add a card, creating the set if needed
    Add {
        /// Set name
        set: String,
        /// Front of the card
        term: String,
        /// Back of the card
        definition: String,
    },

    /// Show a set's cards
    Show {
        /// Set name or ID
        set: String,
    },

    /// Delete a set
    Delete {
        /// Set name or ID
        set: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a single card by ID
    #[command(name = "remove-card")]
    RemoveCard {
        /// Card ID (e.g. card-12)
        card: String,
    },

    /// Write a set's cards to a deck file
    Export {
        /// Set name or ID
        set: String,
        /// Deck file to write
        file: PathBuf,
    },

    /// Add every card of a deck file to a set
    Import {
        /// Set name (created if needed)
        set: String,
        /// Deck file to read
        file: PathBuf,
    },

    /// Study a set interactively
    Study {
        /// Set name or ID
        set: String,
        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Handle a set command
pub fn handle_set_command(storage: &Storage, cmd: SetCommands) -> FlashdeckResult<()> {
    let service = SetService::new(storage);

    match cmd {
        SetCommands::List => {
            let summaries = service.summaries()?;
            print!("{}", format_set_list(&summaries));

            let orphaned = service.orphaned_card_count()?;
            if orphaned > 0 {
                println!();
                println!("{} cards belong to deleted sets.", orphaned);
            }
        }

        SetCommands::Create { name } => {
            let set = service.create_set(&name)?;
            println!("Created set: {}", set.name);
            println!("  ID: {}", set.id);
        }

        SetCommands::Add {
            set,
            term,
            definition,
        } => {
            let added = service.add_card(&set, &term, &definition)?;
            if added.set_created {
                println!("Created set: {}", set.trim());
            }
            println!("Added card '{}' ({})", term.trim(), added.card_id);
        }

        SetCommands::Show { set } => {
            let set = service.require_set(&set)?;
            let cards = service.card_records(set.id)?;
            print!("{}", format_set_details(&set, &cards));
        }

        SetCommands::Delete { set, force } => {
            let presenter = TerminalPresenter::stdio().without_frames().assume_yes(force);
            let mut app = SetStudyApp::new(storage, presenter);

            match app.delete_set(&set)? {
                Some(deleted) => {
                    println!("Deleted set: {}", deleted.set.name);
                    if deleted.cards_removed > 0 {
                        println!("  {} cards deleted", deleted.cards_removed);
                    }
                    if deleted.cards_orphaned > 0 {
                        println!(
                            "  {} cards kept without a set (enable cascade_set_delete to remove them)",
                            deleted.cards_orphaned
                        );
                    }
                }
                None => println!("Cancelled."),
            }
        }

        SetCommands::RemoveCard { card } => {
            let card_id = CardId::parse(&card).map_err(|_| {
                FlashdeckError::Validation(format!("Invalid card ID: '{}'", card))
            })?;
            let removed = service.delete_card(card_id)?;
            println!("Deleted card '{}' ({})", removed.card.term, removed.id);
        }

        SetCommands::Export { set, file } => {
            let set = service.require_set(&set)?;
            let count = service.export_set(set.id, &file)?;
            println!("Exported {} cards from '{}' to {}", count, set.name, file.display());
        }

        SetCommands::Import { set, file } => {
            let summary = service.import_deck(&set, &file)?;
            match summary.status {
                LoadStatus::Missing => {
                    println!("{} does not exist; nothing imported.", file.display())
                }
                LoadStatus::NoCardsParsed => {
                    println!("Warning: no cards could be read from {}", file.display())
                }
                LoadStatus::Loaded => {}
            }
            if summary.set_created {
                println!("Created set: {}", set.trim());
            }
            println!("Imported {} cards into {}", summary.cards_added, summary.set_id);
        }

        SetCommands::Study { set, seed } => {
            let mut app = SetStudyApp::new(storage, TerminalPresenter::stdio());
            if let Some(seed) = seed {
                app = app.with_session(SessionEngine::with_seed(seed));
            }
            app.select_set(&set)?;
            run_study_loop(&mut app)?;
        }
    }

    Ok(())
}
