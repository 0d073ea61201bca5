//! Durable key-value slot abstraction.
//!
//! # Responsibility
//! - Model the synchronous string key-value storage the task list is
//!   mirrored into.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Reads and writes are synchronous and either succeed or return an error
//!   inline; nothing is retried or queued.
//! - `set_item` overwrites the whole value under a key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySlot;
pub use sqlite::SqliteSlot;

pub type SlotResult<T> = Result<T, SlotError>;

/// Failure raised by a key-value slot read or write.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    /// The slot refused the write (quota, read-only medium, injected fault).
    WriteRejected { key: String, reason: String },
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::WriteRejected { key, reason } => {
                write!(f, "write to slot `{key}` rejected: {reason}")
            }
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::WriteRejected { .. } => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous string key-value storage.
pub trait KeyValueSlot {
    /// Returns the stored value, or `None` when the key was never written.
    fn get_item(&self, key: &str) -> SlotResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> SlotResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> SlotResult<()>;
}
