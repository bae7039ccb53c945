//! Page-scoped selection store.

use std::collections::HashMap;

/// Owns the mapping from page index to the records selected on that page.
///
/// The store is the sole source of truth for what is selected. Entries are
/// only ever overwritten by [`commit`](Self::commit), never removed, and a
/// lookup miss does not create an entry. That keeps "explicitly cleared"
/// (an empty entry) distinguishable from "never visited" (no entry).
///
/// A recorded selection is restored verbatim when its page is revisited;
/// the catalog's pages are assumed stable across revisits.
#[derive(Debug)]
pub struct SelectionStore<R> {
    pages: HashMap<u32, Vec<R>>,
}

impl<R: Clone> SelectionStore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the selection recorded for `page`.
    ///
    /// `records` keeps its order and the caller guarantees the records are
    /// unique by key. An empty `records` is a valid, explicit entry.
    pub fn commit(&mut self, page: u32, records: Vec<R>) {
        self.pages.insert(page, records);
    }

    /// Returns the selection recorded for `page`, empty if none.
    pub fn restore(&self, page: u32) -> Vec<R> {
        self.pages.get(&page).cloned().unwrap_or_default()
    }

    /// Returns `true` if a selection (possibly empty) was ever committed
    /// for `page`.
    pub fn is_committed(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Returns the number of pages with a committed entry.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns `true` if no page has a committed entry.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<R> Default for SelectionStore<R> {
    fn default() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_then_restore() {
        let mut store = SelectionStore::new();
        store.commit(1, vec![10, 20, 30]);

        assert_eq!(store.restore(1), vec![10, 20, 30]);
    }

    #[test]
    fn test_commit_overwrites() {
        let mut store = SelectionStore::new();
        store.commit(1, vec![10, 20]);
        store.commit(1, vec![30]);

        assert_eq!(store.restore(1), vec![30]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_restore_untouched_page_is_empty_and_non_creating() {
        let store: SelectionStore<i32> = SelectionStore::new();

        assert_eq!(store.restore(7), Vec::<i32>::new());
        // The miss must not have created an entry.
        assert!(!store.is_committed(7));
        assert_eq!(store.restore(7), Vec::<i32>::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_explicit_empty_is_distinct_from_absent() {
        let mut store = SelectionStore::new();
        store.commit(2, Vec::<i32>::new());

        assert!(store.is_committed(2));
        assert!(!store.is_committed(3));
        assert_eq!(store.restore(2), Vec::<i32>::new());
        assert_eq!(store.restore(3), Vec::<i32>::new());
    }

    #[test]
    fn test_pages_are_independent() {
        let mut store = SelectionStore::new();
        store.commit(1, vec![1, 2]);
        store.commit(2, vec![3]);

        assert_eq!(store.restore(1), vec![1, 2]);
        assert_eq!(store.restore(2), vec![3]);
        assert_eq!(store.len(), 2);
    }
}
