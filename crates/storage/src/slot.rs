//! Loading and saving whole collections to named slots.

use crate::{Result, SlotStore};
use serde::{Serialize, de::DeserializeOwned};

/// Slot holding the book collection.
pub const BOOKS_SLOT: &str = "books";

/// Slot holding the borrow history.
pub const HISTORY_SLOT: &str = "borrowHistory";

/// Load a collection from a slot.
///
/// An absent slot, a failed read, or a value that does not parse all yield an
/// empty collection.
pub fn load<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: SlotStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(slot = key, "slot empty, starting fresh");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "failed to read slot, starting fresh");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "slot holds malformed data, ignoring it");
            Vec::new()
        }
    }
}

/// Serialize a collection and write it to a slot.
pub fn save<T, S>(store: &S, key: &str, items: &[T]) -> Result<()>
where
    T: Serialize,
    S: SlotStore + ?Sized,
{
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}
