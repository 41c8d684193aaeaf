//! The library store: books, borrow history, and their persistence.

use crate::clock::{Clock, IdSequence, SystemClock};
use crate::Result;
use storage::{
    BOOKS_SLOT, Book, BookId, BorrowEvent, EventId, HISTORY_SLOT, SlotStore,
};

/// Which collections a mutation touched.
#[derive(Debug, Clone, Copy)]
enum Dirty {
    Books,
    History,
    Both,
}

/// The owner of all book and history state.
///
/// Every mutation writes the affected collections back to the slot store
/// before returning. A failed write never fails the mutation: it is logged
/// and kept in [`Library::last_save_error`] until a later save succeeds.
pub struct Library<S, C = SystemClock> {
    store: S,
    clock: C,
    books: Vec<Book>,
    history: Vec<BorrowEvent>,
    ids: IdSequence,
    last_save_error: Option<storage::Error>,
}

impl<S: SlotStore> Library<S> {
    /// Open a library over the given store, using the system clock.
    pub fn open(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: SlotStore, C: Clock> Library<S, C> {
    /// Open a library over the given store with an explicit clock.
    ///
    /// Starts from whatever the store holds; missing or malformed slots start
    /// empty.
    pub fn with_clock(store: S, clock: C) -> Self {
        let books: Vec<Book> = storage::load(&store, BOOKS_SLOT);
        let history: Vec<BorrowEvent> = storage::load(&store, HISTORY_SLOT);

        let last_id = books
            .iter()
            .map(|b| b.id.0)
            .chain(history.iter().map(|e| e.id.0))
            .max()
            .unwrap_or(0);

        tracing::debug!(
            books = books.len(),
            history = history.len(),
            "library opened"
        );

        Self {
            store,
            clock,
            books,
            history,
            ids: IdSequence::after(last_id),
            last_save_error: None,
        }
    }

    /// All books, in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// The borrow history, oldest first.
    pub fn history(&self) -> &[BorrowEvent] {
        &self.history
    }

    /// Look up a book by id.
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// The error from the most recent save, if it failed.
    pub fn last_save_error(&self) -> Option<&storage::Error> {
        self.last_save_error.as_ref()
    }

    /// The underlying slot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a book with the given title and category.
    ///
    /// Both are trimmed; if either ends up empty nothing happens and `None`
    /// is returned.
    pub fn add_book(&mut self, title: &str, category: &str) -> Option<BookId> {
        let title = title.trim();
        let category = category.trim();
        if title.is_empty() || category.is_empty() {
            tracing::debug!("ignoring book with empty title or category");
            return None;
        }

        let id = BookId(self.ids.next(self.clock.now_millis()));
        self.books.push(Book::new(id, title, category));
        tracing::info!(%id, title, category, "book added");

        self.persist(Dirty::Books);
        Some(id)
    }

    /// Remove a book. History entries naming it are kept.
    ///
    /// Returns whether a book was removed.
    pub fn delete_book(&mut self, id: BookId) -> bool {
        let Some(pos) = self.books.iter().position(|b| b.id == id) else {
            tracing::debug!(%id, "delete: no such book");
            return false;
        };

        let book = self.books.remove(pos);
        tracing::info!(%id, title = %book.title, "book deleted");

        self.persist(Dirty::Books);
        true
    }

    /// Borrow the book if it is on the shelf, return it if it is out.
    ///
    /// Borrowing appends a history entry; returning does not. Returns the new
    /// borrowed state, or `None` if there is no such book.
    pub fn toggle_borrow(&mut self, id: BookId) -> Option<bool> {
        let Some(book) = self.books.iter_mut().find(|b| b.id == id) else {
            tracing::debug!(%id, "toggle: no such book");
            return None;
        };

        book.is_borrowed = !book.is_borrowed;
        let borrowed = book.is_borrowed;

        if borrowed {
            let event_id = EventId(self.ids.next(self.clock.now_millis()));
            let event = BorrowEvent::new(event_id, book.title.clone(), self.clock.today());
            tracing::info!(%id, title = %event.title, date = %event.date, "book borrowed");
            self.history.push(event);
        } else {
            tracing::info!(%id, title = %book.title, "book returned");
        }

        self.persist(Dirty::Both);
        Some(borrowed)
    }

    /// Remove a history entry.
    ///
    /// Returns whether an entry was removed.
    pub fn delete_history_entry(&mut self, id: EventId) -> bool {
        let Some(pos) = self.history.iter().position(|e| e.id == id) else {
            tracing::debug!(%id, "delete: no such history entry");
            return false;
        };

        self.history.remove(pos);
        tracing::info!(%id, "history entry deleted");

        self.persist(Dirty::History);
        true
    }

    /// Retry a save that failed after an earlier mutation.
    ///
    /// Does nothing when the store already holds every change, so slots the
    /// library never modified are left as they are. Unlike the saves that
    /// follow each mutation, failure is returned to the caller.
    pub fn flush(&mut self) -> Result<()> {
        if self.last_save_error.is_none() {
            return Ok(());
        }
        self.save(Dirty::Both)?;
        self.last_save_error = None;
        Ok(())
    }

    fn save(&self, dirty: Dirty) -> storage::Result<()> {
        if matches!(dirty, Dirty::Books | Dirty::Both) {
            storage::save(&self.store, BOOKS_SLOT, &self.books)?;
        }
        if matches!(dirty, Dirty::History | Dirty::Both) {
            storage::save(&self.store, HISTORY_SLOT, &self.history)?;
        }
        Ok(())
    }

    fn persist(&mut self, dirty: Dirty) {
        // A failed save may have left either slot stale.
        let dirty = if self.last_save_error.is_some() {
            Dirty::Both
        } else {
            dirty
        };

        match self.save(dirty) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                tracing::debug!(error = %e, "failed to save library; changes are kept in memory");
                self.last_save_error = Some(e);
            }
        }
    }
}
