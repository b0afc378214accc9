//! Deck CLI commands
//!
//! Implements CLI commands for the flat-file deck. Every command takes an
//! optional `--file`; without it the configured deck file is used.

use std::path::PathBuf;

use clap::Subcommand;

use crate::app::DeckStudyApp;
use crate::display::set::format_card_list;
use crate::error::FlashdeckResult;
use crate::services::DeckService;
use crate::session::SessionEngine;
use crate::storage::{LoadStatus, Storage};

use super::study::{run_study_loop, TerminalPresenter};

/// Deck subcommands
#[derive(Subcommand)]
pub enum DeckCommands {
    /// List the cards in the deck
    List {
        /// Deck file (defaults to the configured deck)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Add a card and save the deck
    Add {
        /// Front of the card
        term: String,
        /// Back of the card
        #[arg(default_value = "")]
        definition: String,
        /// Deck file (defaults to the configured deck)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Remove a card by term and save the deck
    Remove {
        /// Term of the card to remove (case-insensitive)
        term: String,
        /// Deck file (defaults to the configured deck)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Study the deck interactively
    Study {
        /// Deck file (defaults to the configured deck)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn warn_on_load(status: LoadStatus, service: &DeckService<'_>) {
    if status.is_warning() {
        eprintln!(
            "Warning: {} has content but no cards could be read from it",
            service.deck().path().display()
        );
    }
}

/// Handle a deck command
pub fn handle_deck_command(storage: &Storage, cmd: DeckCommands) -> FlashdeckResult<()> {
    match cmd {
        DeckCommands::List { file } => {
            let (service, status) = DeckService::open(storage, file)?;
            warn_on_load(status, &service);
            println!("Deck: {}", service.deck().path().display());
            println!();
            println!("{}", format_card_list(service.cards()));
        }

        DeckCommands::Add {
            term,
            definition,
            file,
        } => {
            let (mut service, status) = DeckService::open(storage, file)?;
            warn_on_load(status, &service);
            let card = service.add_card(&term, &definition)?;
            service.save()?;
            println!(
                "Added card '{}' to {} ({} cards)",
                card.term,
                service.deck().path().display(),
                service.cards().len()
            );
        }

        DeckCommands::Remove { term, file } => {
            let (mut service, status) = DeckService::open(storage, file)?;
            warn_on_load(status, &service);
            let card = service.remove_card(&term)?;
            service.save()?;
            println!(
                "Removed card '{}' from {}",
                card.term,
                service.deck().path().display()
            );
        }

        DeckCommands::Study { file, seed } => {
            let mut app = DeckStudyApp::open(storage, file, TerminalPresenter::stdio())?;
            if let Some(seed) = seed {
                app = app.with_session(SessionEngine::with_seed(seed));
            }
            if let Err(e) = app.start_session() {
                println!("{}", crate::app::describe_start_error(&e));
            }
            run_study_loop(&mut app)?;
        }
    }

    Ok(())
}
