//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod deck;
pub mod set;
pub mod study;

pub use deck::{handle_deck_command, DeckCommands};
pub use set::{handle_set_command, SetCommands};
pub use study::{run_study_loop, CommandSource, StudyCommand, TerminalPresenter};
