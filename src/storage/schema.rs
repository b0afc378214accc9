//! SQLite schema for sets and cards

use rusqlite::Connection;

use crate::error::{FlashdeckError, FlashdeckResult};

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// AUTOINCREMENT keeps a deleted set's id from being handed to a new set,
// so cards left behind by a non-cascading delete never reattach to it.
// Foreign keys are declared but not enforced (SQLite leaves
// `foreign_keys` off by default); the set/card link is kept by the caller.

pub fn init_schema(conn: &Connection) -> FlashdeckResult<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version > SCHEMA_VERSION {
        return Err(FlashdeckError::Database(format!(
            "database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            set_id INTEGER NOT NULL,
            term TEXT NOT NULL,
            definition TEXT NOT NULL,
            FOREIGN KEY (set_id) REFERENCES sets(id)
        );

        CREATE INDEX IF NOT EXISTS idx_cards_set ON cards(set_id);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}
