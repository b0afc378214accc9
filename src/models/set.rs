//! Card set model
//!
//! A named group of cards in the set database.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CardId, SetId};
use crate::error::{FlashdeckError, FlashdeckResult};

/// A named set of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSet {
    pub id: SetId,
    pub name: String,
}

impl CardSet {
    /// Trim a set name and reject it if nothing is left
    ///
    /// Names are otherwise compared exactly, so "Spanish" and "spanish" are
    /// two different sets.
    pub fn validate_name(name: &str) -> FlashdeckResult<&str> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FlashdeckError::EmptySetName);
        }
        Ok(name)
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Result of adding a card under a set name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedCard {
    pub set_id: SetId,
    pub card_id: CardId,
    /// The set did not exist and was created for this card
    pub set_created: bool,
}

/// Result of adding several cards under a set name at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedCards {
    pub set_id: SetId,
    /// Keys of the new cards, in the order they were given
    pub card_ids: Vec<CardId>,
    pub set_created: bool,
}
