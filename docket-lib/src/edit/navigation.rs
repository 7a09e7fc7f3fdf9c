//! Keyboard traversal over the editable cells of a page.

use super::CellRef;
use crate::model::Column;
use crate::model::EditType;
use crate::model::TableRow;

/// The editable cells of the rendered page as a (row, column) grid.
///
/// Rows are the page's editable rows in display order, columns the editable
/// text-like columns in configured order. Status columns are excluded: they
/// change by drag, not by typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<String>,
    columns: Vec<String>,
}

impl Grid {
    /// Creates a grid from row ids and editable column keys.
    pub fn new<S: Into<String>>(
        rows: impl IntoIterator<Item = S>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the grid for a rendered page.
    pub fn for_page<R: TableRow>(rows: &[&R], columns: &[Column]) -> Self {
        Self {
            rows: rows
                .iter()
                .filter(|row| !row.is_read_only())
                .map(|row| row.id().to_string())
                .collect(),
            columns: columns
                .iter()
                .filter(|c| c.editable && c.edit_type != EditType::Status)
                .map(|c| c.key.clone())
                .collect(),
        }
    }

    /// Returns `true` if there is no editable cell.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// (row index, column index) of a cell.
    pub fn position(&self, cell: &CellRef) -> Option<(usize, usize)> {
        let row = self.rows.iter().position(|id| *id == cell.row_id)?;
        let column = self.columns.iter().position(|key| *key == cell.key)?;
        Some((row, column))
    }

    /// The cell at a (row index, column index) position.
    pub fn cell_at(&self, (row, column): (usize, usize)) -> Option<CellRef> {
        Some(CellRef::new(self.rows.get(row)?, self.columns.get(column)?))
    }

    /// The first editable cell.
    pub fn first(&self) -> Option<CellRef> {
        self.cell_at((0, 0))
    }

    /// The next editable cell, wrapping to the first column of the next row.
    /// `None` past the last cell.
    pub fn next(&self, cell: &CellRef) -> Option<CellRef> {
        let (row, column) = self.position(cell)?;
        if column + 1 < self.columns.len() {
            self.cell_at((row, column + 1))
        } else {
            self.cell_at((row + 1, 0))
        }
    }

    /// The previous editable cell, wrapping to the last column of the
    /// previous row. `None` before the first cell.
    pub fn previous(&self, cell: &CellRef) -> Option<CellRef> {
        let (row, column) = self.position(cell)?;
        if column > 0 {
            self.cell_at((row, column - 1))
        } else if row > 0 {
            self.cell_at((row - 1, self.columns.len() - 1))
        } else {
            None
        }
    }
}
