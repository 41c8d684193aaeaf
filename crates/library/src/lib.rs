//! Shelf library core: the book store and the views derived from it.
//!
//! # Overview
//!
//! - **Library**: owns the books and the borrow history. Adding, deleting and
//!   borrowing go through it, and each change is saved to a
//!   [`storage::SlotStore`] before the call returns.
//! - **query**: filters the books by title and cuts the result into pages.
//!   [`Browse`] holds the current search and page and derives a [`PageView`].
//! - **Clock**: the time source for ids and borrow dates.
//!
//! # Example
//!
//! ```
//! use library::{Browse, Library};
//! use storage::MemorySlots;
//!
//! let mut lib = Library::open(MemorySlots::new());
//! let id = lib.add_book("Dune", "Sci-Fi").unwrap();
//! lib.toggle_borrow(id);
//!
//! let view = Browse::default().view(lib.books());
//! assert_eq!(view.books.len(), 1);
//! assert_eq!(lib.history().len(), 1);
//! ```

mod clock;
mod error;
pub mod query;
mod store;

pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use query::{Browse, DEFAULT_PAGE_SIZE, PageView};
pub use store::Library;
