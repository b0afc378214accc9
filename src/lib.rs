//! flashdeck - Terminal flashcards
//!
//! This library provides the core functionality for the flashdeck study
//! tool. Cards (a term plus a definition) are kept either as named sets in
//! a SQLite database or as a single deck in a delimited text file, and are
//! studied in shuffled sessions, one side at a time.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (cards, sets, IDs)
//! - `storage`: SQLite set database and flat-file deck storage
//! - `session`: Study session state machine
//! - `services`: Business logic layer
//! - `app`: Study controllers and the presenter seam
//! - `audit`: Audit logging system
//! - `cli`: Command handlers and the interactive study loop
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use flashdeck::config::{paths::FlashdeckPaths, settings::Settings};
//! use flashdeck::services::SetService;
//! use flashdeck::storage::Storage;
//!
//! let paths = FlashdeckPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, settings)?;
//! SetService::new(&storage).add_card("Spanish", "perro", "dog")?;
//! ```

pub mod app;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::FlashdeckError;
