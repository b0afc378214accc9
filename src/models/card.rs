//! Card model
//!
//! A card is a term/definition pair. Cards are never edited in place; they
//! are only added and removed whole.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CardId, SetId};
use crate::error::{FlashdeckError, FlashdeckResult};

/// A single flashcard
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Front side. Never empty.
    pub term: String,

    /// Back side. May be empty.
    pub definition: String,
}

impl Card {
    /// Create a validated card
    ///
    /// The term is trimmed and must not be empty. The definition keeps its
    /// interior line breaks, normalized to `\n`, but loses trailing
    /// whitespace, which is what the deck file format would strip on the
    /// next load anyway.
    pub fn new(term: &str, definition: &str) -> FlashdeckResult<Self> {
        let term = term.trim();
        if term.is_empty() {
            return Err(FlashdeckError::EmptyTerm);
        }
        if term.contains('\n') || term.contains('\r') {
            return Err(FlashdeckError::Validation(
                "Card term must be a single line".into(),
            ));
        }

        Ok(Self {
            term: term.to_string(),
            definition: definition
                .replace("\r\n", "\n")
                .replace('\r', "\n")
                .trim_end()
                .to_string(),
        })
    }

    /// Normalize a term for case-insensitive matching
    pub fn normalize_term(term: &str) -> String {
        term.trim().to_lowercase()
    }

    /// Check if this card's term matches (case-insensitive)
    pub fn matches_term(&self, term: &str) -> bool {
        Self::normalize_term(&self.term) == Self::normalize_term(term)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}

/// A card as stored in the set database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub set_id: SetId,
    #[serde(flatten)]
    pub card: Card,
}
