//! Core data models for flashdeck
//!
//! Cards, the sets that group them, and their database keys.

pub mod card;
pub mod ids;
pub mod set;

pub use card::{Card, CardRecord};
pub use ids::{CardId, SetId};
pub use set::{AddedCard, AddedCards, CardSet};
