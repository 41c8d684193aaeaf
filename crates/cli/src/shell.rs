//! Interactive library shell: command parsing, dispatch, and rendering.

use std::io::Write;

use library::{Browse, Library, PageView};
use storage::{BookId, BorrowEvent, EventId, SlotStore};

use crate::error::{Error, Result};

pub const HELP: &str = "\
Commands:
  add <title> | <category>   Add a book
  borrow <id>                Borrow a book, or return it if it is out
  delete <id>                Delete a book
  search [text]              Search titles (no text clears the search)
  page <n>                   Go to page n
  next, prev                 Move between pages
  list                       Show the current page
  history                    Show the borrow history
  forget <id>                Delete a history entry
  help                       Show this help
  quit                       Leave the shell";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { title: String, category: String },
    Toggle(BookId),
    Delete(BookId),
    Search(String),
    Page(usize),
    Next,
    Prev,
    List,
    History,
    Forget(EventId),
    Help,
    Quit,
}

impl Command {
    /// Parse one line of shell input.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "add" => {
                let (title, category) = rest.split_once('|').ok_or_else(|| {
                    Error::InvalidArgument("usage: add <title> | <category>".to_string())
                })?;
                Self::Add {
                    title: title.to_string(),
                    category: category.to_string(),
                }
            }
            "borrow" | "return" => Self::Toggle(parse_id(word, rest)?),
            "delete" => Self::Delete(parse_id(word, rest)?),
            "search" => Self::Search(rest.to_string()),
            "page" => Self::Page(rest.parse().map_err(|_| {
                Error::InvalidArgument(format!("usage: page <n> (got '{rest}')"))
            })?),
            "next" => Self::Next,
            "prev" => Self::Prev,
            "list" | "ls" => Self::List,
            "history" => Self::History,
            "forget" => Self::Forget(parse_id(word, rest)?),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(Error::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    /// Whether the current page is shown again once the command has run.
    fn shows_page_after(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Toggle(_)
                | Self::Delete(_)
                | Self::Search(_)
                | Self::Page(_)
                | Self::Next
                | Self::Prev
                | Self::List
        )
    }
}

fn parse_id<T: std::str::FromStr>(command: &str, arg: &str) -> Result<T> {
    arg.parse()
        .map_err(|_| Error::InvalidArgument(format!("usage: {command} <id> (got '{arg}')")))
}

/// What the shell loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A library plus the user's browsing position.
pub struct Shell<S> {
    library: Library<S>,
    browse: Browse,
}

impl<S: SlotStore> Shell<S> {
    pub fn new(library: Library<S>, page_size: usize) -> Self {
        Self {
            library,
            browse: Browse::new(page_size),
        }
    }

    pub fn library(&self) -> &Library<S> {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library<S> {
        &mut self.library
    }

    pub fn browse(&self) -> &Browse {
        &self.browse
    }

    /// Run one command, writing its output to `out`.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        let show_page = command.shows_page_after();

        match command {
            Command::Add { title, category } => match self.library.add_book(&title, &category) {
                Some(id) => writeln!(out, "Added book {id}.")?,
                None => writeln!(out, "Both a title and a category are required.")?,
            },
            Command::Toggle(id) => match self.library.toggle_borrow(id) {
                Some(true) => writeln!(out, "Borrowed book {id}.")?,
                Some(false) => writeln!(out, "Returned book {id}.")?,
                None => writeln!(out, "No book with id {id}.")?,
            },
            Command::Delete(id) => {
                if self.library.delete_book(id) {
                    writeln!(out, "Deleted book {id}.")?;
                } else {
                    writeln!(out, "No book with id {id}.")?;
                }
            }
            Command::Search(query) => self.browse.set_query(query),
            Command::Page(page) => self.browse.goto(page),
            Command::Next => {
                let total = self.browse.view(self.library.books()).total_pages;
                self.browse.next(total);
            }
            Command::Prev => self.browse.prev(),
            Command::List => {}
            Command::History => render_history(out, self.library.history())?,
            Command::Forget(id) => {
                if self.library.delete_history_entry(id) {
                    writeln!(out, "Deleted history entry {id}.")?;
                } else {
                    writeln!(out, "No history entry with id {id}.")?;
                }
                render_history(out, self.library.history())?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }

        if let Some(e) = self.library.last_save_error() {
            writeln!(out, "Warning: changes are not saved yet: {e}")?;
        }

        if show_page {
            let view = self.browse.view(self.library.books());
            render_page(out, &view, self.browse.query())?;
        }

        Ok(Flow::Continue)
    }
}

/// Print a page of books with a pagination footer.
pub fn render_page(out: &mut impl Write, view: &PageView<'_>, query: &str) -> std::io::Result<()> {
    if !query.is_empty() {
        writeln!(out, "Search: \"{query}\" ({} matches)", view.matches)?;
    }

    if view.books.is_empty() {
        writeln!(out, "No books found.")?;
    } else {
        writeln!(
            out,
            "{:<14}  {:<32}  {:<16}  ACTION",
            "ID", "TITLE", "CATEGORY"
        )?;
        writeln!(out, "{}", "-".repeat(80))?;
        for book in &view.books {
            let action = if book.is_borrowed {
                "Return Book"
            } else {
                "Borrow Book"
            };
            writeln!(
                out,
                "{:<14}  {:<32}  {:<16}  {action}",
                book.id, book.title, book.category
            )?;
        }
    }

    if view.total_pages > 0 {
        let pages: Vec<String> = (1..=view.total_pages)
            .map(|p| {
                if p == view.page {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        writeln!(out, "Pages: {}", pages.join(" "))?;
    }
    Ok(())
}

/// Print the borrow history, oldest first.
pub fn render_history(out: &mut impl Write, history: &[BorrowEvent]) -> std::io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "No borrow history available.");
    }

    writeln!(out, "Borrow History")?;
    for entry in history {
        writeln!(out, "{:<14}  {} - {}", entry.id, entry.title, entry.date)?;
    }
    Ok(())
}
