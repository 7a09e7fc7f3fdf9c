//! Search, sort and page state of one table view.

use super::SortState;

/// The mutable search/sort/page state owned by one table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Current search text.
    pub search: String,
    /// Active sort, if any.
    pub sort: Option<SortState>,
    /// Current page, 1-based.
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
        }
    }
}

impl ViewState {
    /// Creates the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the search text. Returns `true` if it changed, in which case
    /// the page is back to 1.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.search {
            return false;
        }
        self.search = search;
        self.page = 1;
        true
    }

    /// Applies a header click on `key`.
    pub fn toggle_sort(&mut self, key: &str) -> &SortState {
        self.sort.insert(SortState::toggled(self.sort.as_ref(), key))
    }

    /// Back to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Direction;

    #[test]
    fn test_search_change_resets_page() {
        let mut state = ViewState::new();
        state.page = 3;
        assert!(!state.set_search(""));
        assert_eq!(state.page, 3);
        assert!(state.set_search("smith"));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = ViewState::new();
        assert_eq!(state.toggle_sort("name").direction, Direction::Asc);
        assert_eq!(state.toggle_sort("name").direction, Direction::Desc);
        assert_eq!(state.toggle_sort("name").direction, Direction::Asc);
        state.reset();
        assert_eq!(state, ViewState::default());
    }
}
