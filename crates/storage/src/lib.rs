//! Slot-based persistence for the shelf library tracker.
//!
//! The library keeps two collections, the books and the borrow history. This
//! crate stores each of them as a JSON string under a named slot in a flat
//! key-value store.
//!
//! # Core Concepts
//!
//! ## SlotStore
//!
//! A [`SlotStore`] reads and writes string values by key. [`SqliteSlots`]
//! keeps slots in a SQLite file; [`MemorySlots`] keeps them in process and can
//! be made to refuse writes, which is how tests exercise a full store.
//!
//! ## Slots
//!
//! [`load`] and [`save`] move a whole collection in and out of a slot.
//! Loading never fails: an absent or unreadable slot is an empty collection.
//! Saving returns an [`Error`] that callers may downgrade to a warning.
//!
//! ## Records
//!
//! [`Book`] and [`BorrowEvent`] are the persisted records. Their JSON field
//! names (`id`, `title`, `category`, `isBorrowed`, `date`) are fixed.
//!
//! # Example
//!
//! ```no_run
//! use storage::{Book, BookId, SqliteSlots, BOOKS_SLOT};
//!
//! let store = SqliteSlots::open("library.db")?;
//! storage::save(&store, BOOKS_SLOT, &[Book::new(BookId(1), "Dune", "Sci-Fi")])?;
//!
//! let books: Vec<Book> = storage::load(&store, BOOKS_SLOT);
//! assert_eq!(books.len(), 1);
//! # Ok::<(), storage::Error>(())
//! ```

mod error;
mod record;
mod slot;
mod store;

pub use error::{Error, Result};
pub use record::{Book, BookId, BorrowEvent, EventId};
pub use slot::{BOOKS_SLOT, HISTORY_SLOT, load, save};
pub use store::{MemorySlots, SlotStore, SqliteSlots};
