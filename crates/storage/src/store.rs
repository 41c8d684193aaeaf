//! Key-value slot stores.

use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;

/// A flat string key-value store holding named slots.
pub trait SlotStore {
    /// Read a slot. Returns `Ok(None)` if the slot has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// SQLite-backed slot store.
pub struct SqliteSlots {
    conn: Connection,
}

impl SqliteSlots {
    /// Open or create a slot store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory slot store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl SlotStore for SqliteSlots {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process slot store.
///
/// Can be switched unavailable to simulate a full or disabled store: reads
/// keep working, writes fail with [`Error::Unavailable`].
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: RefCell<HashMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }
}

impl SlotStore for MemorySlots {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.unavailable.get() {
            return Err(Error::Unavailable(format!("quota exceeded writing '{key}'")));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_missing_slot_is_none() {
        let store = SqliteSlots::in_memory().unwrap();
        assert_eq!(store.get("books").unwrap(), None);
    }

    #[test]
    fn sqlite_set_overwrites() {
        let store = SqliteSlots::in_memory().unwrap();
        store.set("books", "[]").unwrap();
        store.set("books", "[1]").unwrap();
        assert_eq!(store.get("books").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn sqlite_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!("shelf-slots-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        SqliteSlots::open(&path)
            .unwrap()
            .set("borrowHistory", "[]")
            .unwrap();
        let reopened = SqliteSlots::open(&path).unwrap();
        assert_eq!(reopened.get("borrowHistory").unwrap().as_deref(), Some("[]"));

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn memory_unavailable_rejects_writes() {
        let store = MemorySlots::new();
        store.set("books", "[]").unwrap();
        store.set_unavailable(true);

        let err = store.set("books", "[1]").unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
        assert_eq!(store.get("books").unwrap().as_deref(), Some("[]"));
    }
}
