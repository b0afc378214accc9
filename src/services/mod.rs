//! Service layer for flashdeck
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, deletion policy, and audit logging.

pub mod deck;
pub mod set;

pub use deck::DeckService;
pub use set::{DeletedSet, ImportSummary, SetService, SetSummary};
