//! Search and pagination over the book collection.
//!
//! Everything here is derived from a borrowed slice of books; nothing is
//! mutated and nothing is cached.

use storage::Book;

/// Books shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Books whose title contains `query`, ignoring case, in collection order.
///
/// Categories are not searched. An empty query matches every book.
pub fn filter<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    let needle = query.to_lowercase();
    books
        .iter()
        .filter(|book| book.title.to_lowercase().contains(&needle))
        .collect()
}

/// The 1-based `page` of `items`, `page_size` items per page.
///
/// Page 0 and pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
    else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `count` items. Zero items need zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// One rendered page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    /// Books on this page.
    pub books: Vec<&'a Book>,
    /// The page shown, 1-based. May lie past `total_pages`.
    pub page: usize,
    pub total_pages: usize,
    /// Books matching the query across all pages.
    pub matches: usize,
}

/// The browsing position: a search query and a page number.
///
/// Changing the query leaves the page where it was, so a narrower search can
/// land on an empty page. Callers navigate with [`Browse::next`] and
/// [`Browse::prev`] or pick a page from `1..=total_pages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browse {
    query: String,
    page: usize,
    page_size: usize,
}

impl Default for Browse {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Browse {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn goto(&mut self, page: usize) {
        self.page = page;
    }

    /// Move one page forward, stopping at `total_pages`.
    pub fn next(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Move one page back, stopping at page 1.
    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Derive the current page from `books`.
    pub fn view<'a>(&self, books: &'a [Book]) -> PageView<'a> {
        let filtered = filter(books, &self.query);
        PageView {
            books: paginate(&filtered, self.page, self.page_size).to_vec(),
            page: self.page,
            total_pages: total_pages(filtered.len(), self.page_size),
            matches: filtered.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::BookId;

    fn books(titles: &[&str]) -> Vec<Book> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Book::new(BookId(i as u64 + 1), *t, "Fiction"))
            .collect()
    }

    fn titles<'a>(books: &[&'a Book]) -> Vec<&'a str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn empty_query_matches_all_in_order() {
        let all = books(&["Dune", "Emma", "Beloved"]);
        assert_eq!(titles(&filter(&all, "")), ["Dune", "Emma", "Beloved"]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let all = books(&["Dune", "Dune Messiah", "Emma", "Children of Dune"]);
        assert_eq!(
            titles(&filter(&all, "dUNe")),
            ["Dune", "Dune Messiah", "Children of Dune"]
        );
        assert_eq!(titles(&filter(&all, "mm")), ["Emma"]);
    }

    #[test]
    fn filter_ignores_category() {
        let all = books(&["Dune"]);
        assert!(filter(&all, "fiction").is_empty());
    }

    #[test]
    fn paginate_splits_into_pages() {
        let items: Vec<u32> = (1..=13).collect();
        assert_eq!(paginate(&items, 1, 6), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(paginate(&items, 2, 6), &[7, 8, 9, 10, 11, 12]);
        assert_eq!(paginate(&items, 3, 6), &[13]);
        assert!(paginate(&items, 4, 6).is_empty());
        assert!(paginate(&items, 0, 6).is_empty());
    }

    #[test]
    fn last_page_is_full_when_evenly_divisible() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(total_pages(items.len(), 6), 2);
        assert_eq!(paginate(&items, 2, 6).len(), 6);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(1, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn seven_books_make_two_pages() {
        let all = books(&["1", "2", "3", "4", "5", "6", "7"]);
        let mut browse = Browse::default();

        let first = browse.view(&all);
        assert_eq!(first.total_pages, 2);
        assert_eq!(titles(&first.books), ["1", "2", "3", "4", "5", "6"]);

        browse.next(first.total_pages);
        let second = browse.view(&all);
        assert_eq!(second.page, 2);
        assert_eq!(titles(&second.books), ["7"]);

        browse.next(second.total_pages);
        assert_eq!(browse.page(), 2);
    }

    #[test]
    fn narrowing_search_keeps_page() {
        let all = books(&["a1", "a2", "a3", "a4", "a5", "a6", "b7"]);
        let mut browse = Browse::default();
        browse.goto(2);
        browse.set_query("b");

        let view = browse.view(&all);
        assert_eq!(view.page, 2);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.matches, 1);
        assert!(view.books.is_empty());
    }

    #[test]
    fn prev_stops_at_first_page() {
        let mut browse = Browse::default();
        browse.prev();
        assert_eq!(browse.page(), 1);
    }
}
