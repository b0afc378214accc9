//! SQLite storage for named card sets
//!
//! Every insert and delete commits immediately; there is no separate save.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{FlashdeckError, FlashdeckResult};
use crate::models::{AddedCard, AddedCards, Card, CardId, CardRecord, CardSet, SetId};

use super::schema::init_schema;

/// Connection to the set database
pub struct SetDatabase {
    conn: Connection,
}

impl SetDatabase {
    /// Open (or create) the database file and bring its schema up to date
    pub fn open(db_path: &Path) -> FlashdeckResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    FlashdeckError::Storage(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(db_path).map_err(|e| {
            FlashdeckError::Database(format!(
                "Failed to open database {}: {}",
                db_path.display(),
                e
            ))
        })?;

        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> FlashdeckResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Create an empty set
    ///
    /// Names are unique and compared case-sensitively.
    pub fn create_set(&self, name: &str) -> FlashdeckResult<SetId> {
        let name = CardSet::validate_name(name)?;

        if self.set_id_by_name(name)?.is_some() {
            return Err(FlashdeckError::duplicate_set(name));
        }

        self.conn
            .execute("INSERT INTO sets (name) VALUES (?1)", [name])?;
        Ok(SetId::from_raw(self.conn.last_insert_rowid()))
    }

    /// Add a card under a set name, creating the set if it doesn't exist
    ///
    /// The set and the card are written in one transaction, so a failed card
    /// insert never leaves a new empty set behind. Terms are not checked for
    /// uniqueness within the set.
    pub fn add_card(
        &self,
        set_name: &str,
        term: &str,
        definition: &str,
    ) -> FlashdeckResult<AddedCard> {
        let card = Card::new(term, definition)?;
        let set_name = CardSet::validate_name(set_name)?;

        let tx = self.conn.unchecked_transaction()?;

        let (set_id, set_created) = match self.set_id_by_name(set_name)? {
            Some(id) => (id, false),
            None => {
                tx.execute("INSERT INTO sets (name) VALUES (?1)", [set_name])?;
                (SetId::from_raw(tx.last_insert_rowid()), true)
            }
        };

        tx.execute(
            "INSERT INTO cards (set_id, term, definition) VALUES (?1, ?2, ?3)",
            params![set_id.raw(), &card.term, &card.definition],
        )?;
        let card_id = CardId::from_raw(tx.last_insert_rowid());

        tx.commit()?;

        Ok(AddedCard {
            set_id,
            card_id,
            set_created,
        })
    }

    /// Add validated cards under a set name, creating the set if needed
    ///
    /// Everything is written in one transaction: either the set (if new) and
    /// every card land, or nothing does.
    pub fn add_cards(&self, set_name: &str, cards: &[Card]) -> FlashdeckResult<AddedCards> {
        let set_name = CardSet::validate_name(set_name)?;

        let tx = self.conn.unchecked_transaction()?;

        let (set_id, set_created) = match self.set_id_by_name(set_name)? {
            Some(id) => (id, false),
            None => {
                tx.execute("INSERT INTO sets (name) VALUES (?1)", [set_name])?;
                (SetId::from_raw(tx.last_insert_rowid()), true)
            }
        };

        let mut card_ids = Vec::with_capacity(cards.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cards (set_id, term, definition) VALUES (?1, ?2, ?3)",
            )?;
            for card in cards {
                stmt.execute(params![set_id.raw(), &card.term, &card.definition])?;
                card_ids.push(CardId::from_raw(tx.last_insert_rowid()));
            }
        }

        tx.commit()?;

        Ok(AddedCards {
            set_id,
            card_ids,
            set_created,
        })
    }

    /// Look up a set key by exact name
    pub fn set_id_by_name(&self, name: &str) -> FlashdeckResult<Option<SetId>> {
        let id = self
            .conn
            .query_row(
                "SELECT MIN(id) FROM sets WHERE name = ?1",
                [name],
                |row| row.get::<_, Option<i64>>(0),
            )
            .optional()?
            .flatten();

        Ok(id.map(SetId::from_raw))
    }

    pub fn get_set(&self, id: SetId) -> FlashdeckResult<Option<CardSet>> {
        let set = self
            .conn
            .query_row(
                "SELECT id, name FROM sets WHERE id = ?1",
                [id.raw()],
                |row| {
                    Ok(CardSet {
                        id: SetId::from_raw(row.get(0)?),
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(set)
    }

    /// All sets as a name → key map
    pub fn list_sets(&self) -> FlashdeckResult<BTreeMap<String, SetId>> {
        Ok(self
            .all_sets()?
            .into_iter()
            .map(|set| (set.name, set.id))
            .collect())
    }

    /// All sets in creation order
    pub fn all_sets(&self) -> FlashdeckResult<Vec<CardSet>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM sets ORDER BY id")?;

        let sets = stmt
            .query_map([], |row| {
                Ok(CardSet {
                    id: SetId::from_raw(row.get(0)?),
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;

        Ok(sets)
    }

    /// Cards of a set in insertion order
    pub fn list_cards(&self, set_id: SetId) -> FlashdeckResult<Vec<Card>> {
        Ok(self
            .list_card_records(set_id)?
            .into_iter()
            .map(|record| record.card)
            .collect())
    }

    /// Cards of a set with their keys, in insertion order
    pub fn list_card_records(&self, set_id: SetId) -> FlashdeckResult<Vec<CardRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, set_id, term, definition
            FROM cards
            WHERE set_id = ?1
            ORDER BY id
            "#,
        )?;

        let cards = stmt
            .query_map([set_id.raw()], |row| {
                Ok(CardRecord {
                    id: CardId::from_raw(row.get(0)?),
                    set_id: SetId::from_raw(row.get(1)?),
                    card: Card {
                        term: row.get(2)?,
                        definition: row.get(3)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;

        Ok(cards)
    }

    pub fn get_card(&self, id: CardId) -> FlashdeckResult<Option<CardRecord>> {
        let card = self
            .conn
            .query_row(
                "SELECT id, set_id, term, definition FROM cards WHERE id = ?1",
                [id.raw()],
                |row| {
                    Ok(CardRecord {
                        id: CardId::from_raw(row.get(0)?),
                        set_id: SetId::from_raw(row.get(1)?),
                        card: Card {
                            term: row.get(2)?,
                            definition: row.get(3)?,
                        },
                    })
                },
            )
            .optional()?;

        Ok(card)
    }

    /// Delete a set record
    ///
    /// Without `cascade` the set's cards stay in the `cards` table, pointing
    /// at a key that no longer exists. Returns how many cards were removed.
    pub fn delete_set(&self, set_id: SetId, cascade: bool) -> FlashdeckResult<usize> {
        let tx = self.conn.unchecked_transaction()?;

        let removed = tx.execute("DELETE FROM sets WHERE id = ?1", [set_id.raw()])?;
        if removed == 0 {
            return Err(FlashdeckError::set_not_found(set_id.to_string()));
        }

        let cards_removed = if cascade {
            tx.execute("DELETE FROM cards WHERE set_id = ?1", [set_id.raw()])?
        } else {
            0
        };

        tx.commit()?;
        Ok(cards_removed)
    }

    pub fn delete_card(&self, card_id: CardId) -> FlashdeckResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM cards WHERE id = ?1", [card_id.raw()])?;
        if removed == 0 {
            return Err(FlashdeckError::card_not_found(card_id.to_string()));
        }
        Ok(())
    }

    pub fn card_count(&self, set_id: SetId) -> FlashdeckResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE set_id = ?1",
            [set_id.raw()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Cards whose set no longer exists
    pub fn orphaned_card_count(&self) -> FlashdeckResult<usize> {
        let count: i64 = self.conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM cards
            WHERE set_id NOT IN (SELECT id FROM sets)
            "#,
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
