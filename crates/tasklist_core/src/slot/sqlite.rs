//! SQLite-backed key-value slot.
//!
//! # Invariants
//! - One row per key in `kv_slots`; writes are upserts.
//! - The connection is migrated before the slot is constructed.

use super::{KeyValueSlot, SlotResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable slot stored in the `kv_slots` table.
pub struct SqliteSlot {
    conn: Connection,
}

impl SqliteSlot {
    /// Opens (or creates) the slot database at `path`.
    pub fn open(path: impl AsRef<Path>) -> SlotResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory slot database.
    pub fn open_in_memory() -> SlotResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl KeyValueSlot for SqliteSlot {
    fn get_item(&self, key: &str) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SlotResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}
