//! One table: rows, columns, view state and edit controller together.

use std::path::PathBuf;

use log::debug;

use super::Board;
use super::PageInfo;
use super::SortState;
use super::ViewState;
use super::filter;
use super::page_count;
use super::page_slice;
use super::sort;
use crate::config::TableConfig;
use crate::edit::CellRef;
use crate::edit::CommitOutcome;
use crate::edit::EditController;
use crate::edit::EditKey;
use crate::edit::Grid;
use crate::edit::RecordUpdater;
use crate::export;
use crate::export::DocumentViewer;
use crate::export::DownloadSink;
use crate::model::Column;
use crate::model::TableRow;
use crate::notify::Toasts;

/// A table view over rows of type `R`.
///
/// # Example
///
/// ```
/// use docket_lib::config::TableConfig;
/// use docket_lib::model::{Column, Record};
/// use docket_lib::view::TableView;
///
/// let rows = vec![
///     Record::new("1").set("name", "Alice").set("amount", 500i64),
///     Record::new("2").set("name", "bob").set("amount", 50i64),
/// ];
/// let columns = vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("amount", "Amount").sortable(),
/// ];
/// let mut view = TableView::new(columns, TableConfig::default().with_search_field("name"))
///     .with_rows(rows);
///
/// view.set_search("b");
/// assert_eq!(view.visible().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TableView<R: TableRow> {
    rows: Vec<R>,
    columns: Vec<Column>,
    config: TableConfig,
    state: ViewState,
    editor: EditController,
}

impl<R: TableRow> TableView<R> {
    /// Creates an empty view.
    pub fn new(columns: Vec<Column>, config: TableConfig) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            config,
            state: ViewState::new(),
            editor: EditController::new(),
        }
    }

    /// Sets the initial rows.
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The edit controller. Clones share state with the view.
    pub fn editor(&self) -> &EditController {
        &self.editor
    }

    /// Returns the column with the given key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    fn row(&self, id: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replaces the data set. Search, sort, page and any edit are reset.
    pub fn load(&mut self, rows: Vec<R>) {
        debug!("Loading {} rows", rows.len());
        self.rows = rows;
        self.state.reset();
        self.editor.cancel();
    }

    /// Replaces the rows after an update elsewhere, keeping search and sort.
    /// The page goes back to 1.
    pub fn refresh(&mut self, rows: Vec<R>) {
        debug!("Refreshing {} rows", rows.len());
        self.rows = rows;
        self.state.page = 1;
    }

    // -------------------------------------------------------------------------
    // State changes
    // -------------------------------------------------------------------------

    /// Sets the search text. The page goes back to 1 if it changed.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.set_search(search);
    }

    /// Header click on `key`. Returns the new sort, or `None` for columns
    /// that are not sortable.
    pub fn toggle_sort(&mut self, key: &str) -> Option<&SortState> {
        if !self.column(key).is_some_and(|c| c.sortable) {
            debug!("Column {} is not sortable", key);
            return None;
        }
        Some(self.state.toggle_sort(key))
    }

    /// Number of pages for the current filter, at least 1.
    pub fn page_count(&self) -> usize {
        page_count(self.processed().len(), self.config.page_size).max(1)
    }

    /// Jumps to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.state.page = page.clamp(1, self.page_count());
        self.state.page
    }

    /// Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let before = self.state.page;
        self.set_page(before + 1) != before
    }

    /// Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        let before = self.state.page;
        self.set_page(before.saturating_sub(1)) != before
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Filtered and sorted rows across every page.
    pub fn processed(&self) -> Vec<&R> {
        let mut rows = filter(
            &self.rows,
            self.config.search_field.as_deref(),
            &self.state.search,
        );
        sort(&mut rows, self.state.sort.as_ref());
        rows
    }

    /// Rows of the current page.
    pub fn visible(&self) -> Vec<&R> {
        let processed = self.processed();
        page_slice(&processed, self.current_page(processed.len()), self.config.page_size).to_vec()
    }

    /// Pagination summary of the current page.
    pub fn page_info(&self) -> PageInfo {
        let total = self.processed().len();
        PageInfo::new(self.current_page(total), self.config.page_size, total)
    }

    fn current_page(&self, total: usize) -> usize {
        let pages = page_count(total, self.config.page_size).max(1);
        self.state.page.clamp(1, pages)
    }

    /// Filtered and sorted rows grouped by an option column.
    pub fn board(&self, key: &str) -> Option<Board<'_, R>> {
        let column = self.column(key).filter(|c| c.edit_type.has_options())?;
        Some(Board::new(&self.processed(), column))
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Editable cells of the current page.
    pub fn grid(&self) -> Grid {
        Grid::for_page(&self.visible(), &self.columns)
    }

    /// Starts editing a cell on the current page.
    ///
    /// Moving from another cell is a blur: its draft is committed first, and
    /// the new cell is only entered if that commit leaves edit mode.
    pub async fn begin_edit(
        &self,
        row_id: &str,
        key: &str,
        updater: &dyn RecordUpdater,
        toasts: &Toasts,
    ) -> bool {
        if let Some(current) = self.editor.editing()
            && current != CellRef::new(row_id, key)
            && !self.editor.commit(updater, toasts).await.is_finished()
        {
            debug!("Keeping focus on {}", current);
            return false;
        }
        self.start_edit(row_id, key)
    }

    /// Focus on a cell. In edit mode this starts editing it.
    pub async fn focus(
        &self,
        row_id: &str,
        key: &str,
        updater: &dyn RecordUpdater,
        toasts: &Toasts,
    ) -> bool {
        self.editor.edit_mode() && self.begin_edit(row_id, key, updater, toasts).await
    }

    fn start_edit(&self, row_id: &str, key: &str) -> bool {
        let visible = self.visible();
        let Some(row) = visible.iter().find(|r| r.id() == row_id) else {
            debug!("Row {} is not on the current page", row_id);
            return false;
        };
        let Some(column) = self.column(key) else {
            return false;
        };
        self.editor.begin_edit(*row, column)
    }

    pub fn set_draft(&self, text: impl Into<String>) -> bool {
        self.editor.set_draft(text)
    }

    /// Commits the cell being edited (blur).
    pub async fn commit(&self, updater: &dyn RecordUpdater, toasts: &Toasts) -> CommitOutcome {
        self.editor.commit(updater, toasts).await
    }

    /// Handles a key while a cell is being edited and returns the cell that
    /// is being edited afterwards.
    ///
    /// Escape cancels. Enter and Tab commit and move forward, Shift+Tab
    /// commits and moves back. A draft that fails to commit keeps the focus;
    /// moving past either end of the page leaves editing.
    pub async fn handle_key(
        &self,
        key: EditKey,
        updater: &dyn RecordUpdater,
        toasts: &Toasts,
    ) -> Option<CellRef> {
        let current = self.editor.editing()?;

        if key == EditKey::Escape {
            self.editor.cancel();
            return None;
        }

        let outcome = self.editor.commit(updater, toasts).await;
        if !outcome.is_finished() {
            return Some(current);
        }

        let grid = self.grid();
        let target = match key {
            EditKey::BackTab => grid.previous(&current),
            _ => grid.next(&current),
        };
        let Some(target) = target else {
            debug!("Left edit at {}", current);
            return None;
        };
        self.start_edit(&target.row_id, &target.key)
            .then_some(target)
    }

    /// Moves row `row_id` to option `value` of column `key` (status board
    /// drag or click).
    pub async fn apply_option(
        &self,
        row_id: &str,
        key: &str,
        value: &str,
        updater: &dyn RecordUpdater,
        toasts: &Toasts,
    ) -> CommitOutcome {
        let (Some(row), Some(column)) = (self.row(row_id), self.column(key)) else {
            return CommitOutcome::Idle;
        };
        self.editor
            .apply_option(row, column, value, updater, toasts)
            .await
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Exports every filtered and sorted row as delimited text.
    pub fn export_csv(&self, title: &str, sink: &dyn DownloadSink) -> Option<PathBuf> {
        export::export_csv(
            &self.processed(),
            &self.columns,
            title,
            &self.config.export,
            sink,
        )
    }

    /// Opens every filtered and sorted row as a print document.
    pub fn export_print(&self, title: &str, viewer: &dyn DocumentViewer) -> bool {
        export::export_print(
            &self.processed(),
            &self.columns,
            title,
            &self.config.export,
            viewer,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::edit::MemoryUpdater;
    use crate::model::{EditType, Record, Value};
    use crate::view::Direction;

    fn numbered(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::new(i.to_string()).set("name", format!("Client {i:02}")))
            .collect()
    }

    fn view(rows: Vec<Record>) -> TableView<Record> {
        let columns = vec![
            Column::new("name", "Name").sortable().editable(EditType::Text),
            Column::new("note", "Note"),
        ];
        TableView::new(columns, TableConfig::default().with_search_field("name")).with_rows(rows)
    }

    #[test]
    fn test_search_resets_page() {
        let mut view = view(numbered(25));
        view.set_page(3);
        assert_eq!(view.state().page, 3);

        view.set_search("client 1");
        assert_eq!(view.state().page, 1);
        assert_eq!(view.page_info().total_items, 10);
    }

    #[test]
    fn test_page_is_clamped() {
        let mut view = view(numbered(25));
        assert_eq!(view.set_page(9), 3);
        assert_eq!(view.visible().len(), 5);
        assert!(!view.next_page());
        assert_eq!(view.set_page(0), 1);
        assert!(!view.previous_page());
        assert!(view.next_page());
        assert_eq!(view.state().page, 2);
    }

    #[test]
    fn test_toggle_sort_only_on_sortable_columns() {
        let mut view = view(numbered(3));
        assert_eq!(view.toggle_sort("note"), None);
        assert_eq!(view.toggle_sort("name").map(|s| s.direction), Some(Direction::Asc));
        assert_eq!(view.toggle_sort("name").map(|s| s.direction), Some(Direction::Desc));
        assert_eq!(view.visible()[0].id(), "3");
    }

    #[test]
    fn test_load_resets_state_and_refresh_keeps_sort() {
        let mut view = view(numbered(25));
        view.toggle_sort("name");
        view.set_search("client");
        view.set_page(2);

        view.refresh(numbered(30));
        assert_eq!(view.state().page, 1);
        assert!(view.state().sort.is_some());

        view.load(numbered(5));
        assert_eq!(view.state(), &ViewState::default());
    }

    #[tokio::test]
    async fn test_begin_edit_only_on_visible_rows() {
        let rows = numbered(25);
        let updater = MemoryUpdater::new(rows.clone());
        let toasts = Toasts::new();
        let view = view(rows);

        assert!(!view.begin_edit("15", "name", &updater, &toasts).await);
        assert!(view.begin_edit("5", "name", &updater, &toasts).await);
        assert!(!view.begin_edit("5", "missing", &updater, &toasts).await);
    }

    #[tokio::test]
    async fn test_focus_requires_edit_mode() {
        let rows = numbered(3);
        let updater = MemoryUpdater::new(rows.clone());
        let toasts = Toasts::new();
        let view = view(rows);

        assert!(!view.focus("1", "name", &updater, &toasts).await);
        view.editor().set_edit_mode(true);
        assert!(view.focus("1", "name", &updater, &toasts).await);
        assert_eq!(view.editor().editing(), Some(CellRef::new("1", "name")));
    }

    fn contact_view(rows: Vec<Record>) -> TableView<Record> {
        let columns = vec![
            Column::new("name", "Name").editable(EditType::Text),
            Column::new("email", "Email").editable(EditType::Email),
            Column::new("amount", "Amount").editable(EditType::Text),
        ];
        TableView::new(columns, TableConfig::default()).with_rows(rows)
    }

    fn contact() -> Record {
        Record::new("1")
            .set("name", "Alice")
            .set("email", "alice@example.com")
            .set("amount", 500i64)
    }

    #[tokio::test]
    async fn test_focus_move_commits_previous_draft() {
        let updater = MemoryUpdater::new(vec![contact()]);
        let toasts = Toasts::new();
        let view = contact_view(vec![contact()]);
        view.editor().set_edit_mode(true);

        assert!(view.focus("1", "name", &updater, &toasts).await);
        view.set_draft("Alicia");
        assert!(view.focus("1", "email", &updater, &toasts).await);

        assert_eq!(updater.records()[0].get("name"), Some(&Value::from("Alicia")));
        assert_eq!(view.editor().editing(), Some(CellRef::new("1", "email")));
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_draft_keeps_focus() {
        let updater = MemoryUpdater::new(vec![contact()]);
        let toasts = Toasts::new();
        let view = contact_view(vec![contact()]);
        view.editor().set_edit_mode(true);

        assert!(view.focus("1", "amount", &updater, &toasts).await);
        view.set_draft("lots");
        assert!(!view.focus("1", "name", &updater, &toasts).await);

        assert_eq!(view.editor().editing(), Some(CellRef::new("1", "amount")));
        assert_eq!(view.editor().draft().as_deref(), Some("lots"));
        assert_eq!(updater.records()[0].get("amount"), Some(&Value::Int(500)));
        assert_eq!(toasts.drain().len(), 1);
    }

    #[test]
    fn test_board_requires_option_column() {
        let view = view(numbered(3));
        assert!(view.board("name").is_none());
    }

    #[tokio::test]
    async fn test_back_tab_walks_backwards() {
        let rows = numbered(2);
        let updater = MemoryUpdater::new(rows.clone());
        let toasts = Toasts::new();
        let view = view(rows);

        view.begin_edit("2", "name", &updater, &toasts).await;
        let cell = view.handle_key(EditKey::BackTab, &updater, &toasts).await;
        assert_eq!(cell, Some(CellRef::new("1", "name")));
        let cell = view.handle_key(EditKey::BackTab, &updater, &toasts).await;
        assert_eq!(cell, None);
        assert_eq!(view.editor().editing(), None);
    }

    #[tokio::test]
    async fn test_page_size_bounds_navigation() {
        let rows = numbered(3);
        let updater = MemoryUpdater::new(rows.clone());
        let toasts = Toasts::new();
        let mut view = view(rows);
        view.config = TableConfig::default().with_page_size(NonZeroUsize::new(2).unwrap());

        view.begin_edit("2", "name", &updater, &toasts).await;
        assert_eq!(view.handle_key(EditKey::Tab, &updater, &toasts).await, None);
    }
}
