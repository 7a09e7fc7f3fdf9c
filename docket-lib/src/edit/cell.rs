//! Cell addressing and edit states

use std::fmt;

/// Address of one cell: the row's id and the column key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row_id: String,
    pub key: String,
}

impl CellRef {
    /// Creates a new cell reference.
    pub fn new(row_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.row_id, self.key)
    }
}

/// How a cell should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Plain value.
    Display,
    /// Input with the draft (or, in edit mode, the current value).
    Editing,
    /// A commit for this cell is in flight.
    Pending,
}

/// Keys the edit controller reacts to while a cell is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Commit and move to the next editable cell.
    Enter,
    /// Commit and move to the next editable cell.
    Tab,
    /// Shift+Tab: commit and move to the previous editable cell.
    BackTab,
    /// Discard the draft.
    Escape,
}
