//! Flat-file deck storage
//!
//! A deck file is UTF-8 text holding one card after another:
//!
//! ```text
//! Cat
//! A small animal
//! %%%
//! Dog
//! A bigger animal
//! ```
//!
//! The first non-blank line of a card is its term. Every following line up
//! to a line consisting of exactly the separator token (or end of file) is
//! the definition. The writer never emits a separator after the last card,
//! and the reader does not require one.

use std::path::{Path, PathBuf};

use crate::config::settings::{Settings, DEFAULT_SEPARATOR};
use crate::error::{FlashdeckError, FlashdeckResult};
use crate::models::Card;

use super::file_io::{read_text, write_text_atomic, write_text_in_place};

/// What a load found at the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file does not exist; the deck starts empty
    Missing,
    /// The file was read (it may legitimately hold no cards)
    Loaded,
    /// The file has content but no card could be parsed from it
    NoCardsParsed,
}

impl LoadStatus {
    /// Whether the caller should warn the user about this load
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoCardsParsed)
    }
}

/// Cards read from a deck file, plus how the read went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLoad {
    pub cards: Vec<Card>,
    pub status: LoadStatus,
}

/// Parse deck text into cards
pub fn parse_deck(text: &str, separator: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    let mut term: Option<&str> = None;
    let mut definition: Vec<&str> = Vec::new();

    // str::lines also strips the '\r' of CRLF endings
    for line in text.lines() {
        if line == separator {
            flush_card(&mut cards, &mut term, &mut definition);
            continue;
        }

        match term {
            None if line.trim().is_empty() => continue,
            None => term = Some(line.trim()),
            Some(_) => definition.push(line),
        }
    }
    flush_card(&mut cards, &mut term, &mut definition);

    cards
}

fn flush_card<'a>(cards: &mut Vec<Card>, term: &mut Option<&'a str>, definition: &mut Vec<&'a str>) {
    if let Some(term) = term.take() {
        let definition = definition.join("\n");
        cards.push(Card {
            term: term.to_string(),
            definition: definition.trim_end().to_string(),
        });
    }
    definition.clear();
}

/// Render cards as deck text
pub fn render_deck(cards: &[Card], separator: &str) -> String {
    let joiner = format!("\n{}\n", separator);
    cards
        .iter()
        .map(|card| format!("{}\n{}", card.term, card.definition))
        .collect::<Vec<_>>()
        .join(&joiner)
}

/// Read a deck file
///
/// A missing file is an empty deck, not an error.
pub fn load_deck<P: AsRef<Path>>(path: P, separator: &str) -> FlashdeckResult<DeckLoad> {
    let path = path.as_ref();

    let Some(text) = read_text(path)? else {
        return Ok(DeckLoad {
            cards: Vec::new(),
            status: LoadStatus::Missing,
        });
    };

    let cards = parse_deck(&text, separator);
    let status = if cards.is_empty() && !text.is_empty() {
        log::warn!("{} has content but no cards could be parsed", path.display());
        LoadStatus::NoCardsParsed
    } else {
        LoadStatus::Loaded
    };

    Ok(DeckLoad { cards, status })
}

/// Write a deck file, replacing whatever was there
pub fn save_deck<P: AsRef<Path>>(
    path: P,
    cards: &[Card],
    separator: &str,
    atomic: bool,
) -> FlashdeckResult<()> {
    let text = render_deck(cards, separator);
    if atomic {
        write_text_atomic(path, &text)
    } else {
        write_text_in_place(path, &text)
    }
}

/// The loaded deck plus its unsaved-changes flag
#[derive(Debug)]
pub struct DeckFile {
    path: PathBuf,
    separator: String,
    atomic_save: bool,
    cards: Vec<Card>,
    dirty: bool,
}

impl DeckFile {
    /// Create an empty, clean deck bound to a file path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            separator: DEFAULT_SEPARATOR.to_string(),
            atomic_save: true,
            cards: Vec::new(),
            dirty: false,
        }
    }

    /// Create a deck using the separator and save mode from settings
    pub fn with_settings(path: PathBuf, settings: &Settings) -> Self {
        Self {
            separator: settings.separator.clone(),
            atomic_save: settings.atomic_save,
            ..Self::new(path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the deck at another file. Cards and the dirty flag are kept.
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Load cards from the bound file, replacing the in-memory deck
    ///
    /// On a read error the in-memory deck is left as it was.
    pub fn load(&mut self) -> FlashdeckResult<LoadStatus> {
        let loaded = load_deck(&self.path, &self.separator)?;
        self.cards = loaded.cards;
        self.dirty = false;
        Ok(loaded.status)
    }

    /// Write the deck to the bound file and clear the dirty flag
    ///
    /// On failure the dirty flag stays set.
    pub fn save(&mut self) -> FlashdeckResult<()> {
        save_deck(&self.path, &self.cards, &self.separator, self.atomic_save)?;
        self.dirty = false;
        Ok(())
    }

    /// Add a card, rejecting a term already in the deck (case-insensitive)
    pub fn add_card(&mut self, term: &str, definition: &str) -> FlashdeckResult<Card> {
        let card = Card::new(term, definition)?;

        if card.term == self.separator
            || card.definition.lines().any(|line| line == self.separator)
        {
            return Err(FlashdeckError::Validation(format!(
                "Card cannot contain a line reading '{}'",
                self.separator
            )));
        }

        if self.find(&card.term).is_some() {
            return Err(FlashdeckError::duplicate_term(card.term));
        }

        self.cards.push(card.clone());
        self.dirty = true;
        Ok(card)
    }

    /// Remove the card with the given term (case-insensitive)
    pub fn remove_card(&mut self, term: &str) -> FlashdeckResult<Card> {
        let index = self
            .cards
            .iter()
            .position(|c| c.matches_term(term))
            .ok_or_else(|| FlashdeckError::card_not_found(term.trim()))?;

        self.dirty = true;
        Ok(self.cards.remove(index))
    }

    /// Find a card by term (case-insensitive)
    pub fn find(&self, term: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.matches_term(term))
    }

    /// All cards in insertion order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the deck has changes not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn card(term: &str, definition: &str) -> Card {
        Card {
            term: term.into(),
            definition: definition.into(),
        }
    }

    fn create_test_deck() -> (TempDir, DeckFile) {
        let temp_dir = TempDir::new().unwrap();
        let deck = DeckFile::new(temp_dir.path().join("deck.txt"));
        (temp_dir, deck)
    }

    #[test]
    fn test_parse_example() {
        let cards = parse_deck("Cat\nA small animal\n%%%\nDog\nA bigger animal", "%%%");
        assert_eq!(
            cards,
            vec![card("Cat", "A small animal"), card("Dog", "A bigger animal")]
        );
    }

    #[test]
    fn test_parse_tolerates_trailing_separator_and_blank_lines() {
        let text = "\n\nCat\nA small animal\n%%%\n\nDog\nA bigger animal\n%%%\n";
        let cards = parse_deck(text, "%%%");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1], card("Dog", "A bigger animal"));
    }

    #[test]
    fn test_parse_crlf() {
        let cards = parse_deck("Cat\r\nA small animal\r\n%%%\r\nDog\r\n", "%%%");
        assert_eq!(cards, vec![card("Cat", "A small animal"), card("Dog", "")]);
    }

    #[test]
    fn test_parse_multiline_definition() {
        let cards = parse_deck("Verb\nline one\nline two   \n\n%%%\n", "%%%");
        assert_eq!(cards, vec![card("Verb", "line one\nline two")]);
    }

    #[test]
    fn test_parse_only_separators_yields_nothing() {
        assert!(parse_deck("%%%\n%%%\n", "%%%").is_empty());
    }

    #[test]
    fn test_render_has_no_trailing_separator() {
        let text = render_deck(&[card("Cat", "meow"), card("Dog", "woof")], "%%%");
        assert_eq!(text, "Cat\nmeow\n%%%\nDog\nwoof");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp_dir, mut deck) = create_test_deck();
        assert_eq!(deck.load().unwrap(), LoadStatus::Missing);
        assert!(deck.is_empty());
        assert!(!deck.is_dirty());
    }

    #[test]
    fn test_load_garbage_reports_warning() {
        let (temp_dir, mut deck) = create_test_deck();
        fs::write(temp_dir.path().join("deck.txt"), "%%%\n   \n%%%").unwrap();

        let status = deck.load().unwrap();
        assert_eq!(status, LoadStatus::NoCardsParsed);
        assert!(status.is_warning());
    }

    #[test]
    fn test_load_whitespace_only_reports_warning() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.txt");
        fs::write(&path, "\n   \n\n").unwrap();

        let loaded = load_deck(&path, "%%%").unwrap();
        assert!(loaded.cards.is_empty());
        assert_eq!(loaded.status, LoadStatus::NoCardsParsed);

        fs::write(&path, "").unwrap();
        assert_eq!(load_deck(&path, "%%%").unwrap().status, LoadStatus::Loaded);
    }

    #[test]
    fn test_crlf_definition_round_trip() {
        let (_temp_dir, mut deck) = create_test_deck();
        deck.add_card("Cat", "line1\r\nline2").unwrap();
        deck.save().unwrap();

        let mut reloaded = DeckFile::new(deck.path().to_path_buf());
        reloaded.load().unwrap();
        assert_eq!(reloaded.cards(), deck.cards());
        assert_eq!(reloaded.cards()[0].definition, "line1\nline2");
    }

    #[test]
    fn test_load_failure_keeps_cards() {
        let (temp_dir, mut deck) = create_test_deck();
        deck.add_card("Cat", "meow").unwrap();

        // A directory where the file should be cannot be read as text
        fs::create_dir(temp_dir.path().join("deck.txt")).unwrap();

        assert!(deck.load().unwrap_err().is_persistence());
        assert_eq!(deck.len(), 1);
        assert!(deck.is_dirty());
    }

    #[test]
    fn test_add_cards_in_order() {
        let (_temp_dir, mut deck) = create_test_deck();
        deck.add_card("A", "1").unwrap();
        deck.add_card("B", "2").unwrap();
        deck.add_card("C", "3").unwrap();

        let terms: Vec<_> = deck.cards().iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["A", "B", "C"]);
        assert!(deck.is_dirty());
    }

    #[test]
    fn test_duplicate_term_rejected() {
        let (_temp_dir, mut deck) = create_test_deck();
        deck.add_card("Cat", "meow").unwrap();

        let err = deck.add_card("CAT", "something else").unwrap_err();
        assert!(matches!(err, FlashdeckError::Duplicate { .. }));
        assert_eq!(deck.cards(), &[card("Cat", "meow")]);
    }

    #[test]
    fn test_empty_term_rejected() {
        let (_temp_dir, mut deck) = create_test_deck();
        assert!(matches!(
            deck.add_card("  ", "x"),
            Err(FlashdeckError::EmptyTerm)
        ));
        assert!(!deck.is_dirty());
    }

    #[test]
    fn test_separator_line_in_definition_rejected() {
        let (_temp_dir, mut deck) = create_test_deck();
        let err = deck.add_card("Cat", "before\n%%%\nafter").unwrap_err();
        assert!(err.is_validation());
        assert!(deck.is_empty());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let (temp_dir, mut deck) = create_test_deck();
        deck.add_card("Cat", "A small animal").unwrap();
        deck.add_card("Verb", "line one\nline two").unwrap();
        deck.add_card("Blank", "").unwrap();
        deck.save().unwrap();
        assert!(!deck.is_dirty());

        let mut reloaded = DeckFile::new(temp_dir.path().join("deck.txt"));
        assert_eq!(reloaded.load().unwrap(), LoadStatus::Loaded);
        assert_eq!(reloaded.cards(), deck.cards());
    }

    #[test]
    fn test_in_place_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.atomic_save = false;
        settings.separator = "---".into();

        let path = temp_dir.path().join("deck.txt");
        let mut deck = DeckFile::with_settings(path.clone(), &settings);
        deck.add_card("Cat", "meow").unwrap();
        deck.add_card("Dog", "woof").unwrap();
        deck.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Cat\nmeow\n---\nDog\nwoof");
    }

    #[test]
    fn test_failed_save_keeps_dirty_flag() {
        let (temp_dir, mut deck) = create_test_deck();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        deck.set_path(blocker.join("deck.txt"));

        deck.add_card("Cat", "meow").unwrap();
        assert!(deck.save().is_err());
        assert!(deck.is_dirty());
    }

    #[test]
    fn test_remove_card() {
        let (_temp_dir, mut deck) = create_test_deck();
        deck.add_card("Cat", "meow").unwrap();
        deck.add_card("Dog", "woof").unwrap();
        deck.save().unwrap();

        let removed = deck.remove_card("cat").unwrap();
        assert_eq!(removed.term, "Cat");
        assert_eq!(deck.len(), 1);
        assert!(deck.is_dirty());

        assert!(deck.remove_card("Cat").unwrap_err().is_not_found());
    }
}
