//! Session state machine
//!
//! ```text
//! Idle ──start──▶ Active(0, false)
//! Active(i, false) ──reveal──▶ Active(i, true)
//! Active(i, _) ──advance──▶ Active(i+1, false)   if i+1 < len
//! Active(i, _) ──advance──▶ Idle                  otherwise
//! Active(_, _) ──reshuffle──▶ Active(0, false)
//! ```
//!
//! Operations that need an active cursor are silent no-ops while idle.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{FlashdeckError, FlashdeckResult};
use crate::models::Card;

/// Where the cursor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active { index: usize, revealed: bool },
}

/// Result of moving to the next card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// A card is showing after the move
    pub has_next: bool,
}

/// Result of a reshuffle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shuffle {
    Shuffled,
    NothingToShuffle,
}

/// What a presenter needs to draw the study view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    /// Front of the current card
    pub term: Option<String>,
    /// Back of the current card, once revealed
    pub definition: Option<String>,
    /// 1-based position of the current card
    pub position: Option<usize>,
    pub total: usize,
    /// The last card was passed and the deck is kept for a reshuffle
    pub finished: bool,
}

/// Shuffled deck plus cursor
pub struct SessionEngine<R: Rng = StdRng> {
    deck: Vec<Card>,
    state: SessionState,
    rng: R,
}

impl SessionEngine<StdRng> {
    /// Engine shuffling with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Engine whose shuffles are reproducible for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Seeded when a seed is configured, otherwise from entropy
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for SessionEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SessionEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            deck: Vec::new(),
            state: SessionState::Idle,
            rng,
        }
    }

    /// Start studying a copy of `source` in a fresh random order
    ///
    /// An empty source is rejected and any running session is left alone.
    pub fn start_session(&mut self, source: &[Card]) -> FlashdeckResult<()> {
        if source.is_empty() {
            return Err(FlashdeckError::EmptyDeck);
        }

        let mut deck = source.to_vec();
        deck.shuffle(&mut self.rng);

        self.deck = deck;
        self.state = SessionState::Active {
            index: 0,
            revealed: false,
        };
        Ok(())
    }

    /// Drop the deck and return to idle
    pub fn end_session(&mut self) {
        self.deck.clear();
        self.state = SessionState::Idle;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, SessionState::Active { revealed: true, .. })
    }

    /// The deck in session order. Kept after the session finishes.
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn current_card(&self) -> Option<&Card> {
        match self.state {
            SessionState::Active { index, .. } => self.deck.get(index),
            SessionState::Idle => None,
        }
    }

    /// Show the back of the current card
    pub fn reveal(&mut self) {
        if let SessionState::Active { index, .. } = self.state {
            self.state = SessionState::Active {
                index,
                revealed: true,
            };
        }
    }

    /// Move to the next card, finishing the session after the last one
    pub fn advance(&mut self) -> Advance {
        let SessionState::Active { index, .. } = self.state else {
            return Advance { has_next: false };
        };

        let next = index + 1;
        if next < self.deck.len() {
            self.state = SessionState::Active {
                index: next,
                revealed: false,
            };
            Advance { has_next: true }
        } else {
            self.state = SessionState::Idle;
            Advance { has_next: false }
        }
    }

    /// Step back one card, stopping at the first
    pub fn previous(&mut self) {
        if let SessionState::Active { index, .. } = self.state {
            self.state = SessionState::Active {
                index: index.saturating_sub(1),
                revealed: false,
            };
        }
    }

    /// Re-permute the current deck in place and restart at its first card
    ///
    /// Works on a finished session too, as long as its deck was kept.
    pub fn reshuffle(&mut self) -> Shuffle {
        if self.deck.is_empty() {
            return Shuffle::NothingToShuffle;
        }

        self.deck.shuffle(&mut self.rng);
        self.state = SessionState::Active {
            index: 0,
            revealed: false,
        };
        Shuffle::Shuffled
    }

    /// 1-based position and deck size while active
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            SessionState::Active { index, .. } => Some((index + 1, self.deck.len())),
            SessionState::Idle => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let card = self.current_card();
        SessionSnapshot {
            term: card.map(|c| c.term.clone()),
            definition: card
                .filter(|_| self.is_revealed())
                .map(|c| c.definition.clone()),
            position: self.progress().map(|(position, _)| position),
            total: self.deck.len(),
            finished: !self.is_active() && !self.deck.is_empty(),
        }
    }
}
