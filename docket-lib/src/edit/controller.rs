//! Cell edit controller.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use log::debug;
use log::warn;

use super::CellRef;
use super::CellState;
use super::RecordUpdater;
use crate::error::UpdateError;
use crate::error::ValidationError;
use crate::model::Column;
use crate::model::EditType;
use crate::model::TableRow;
use crate::model::Value;
use crate::notify::Toast;
use crate::notify::Toasts;

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// No cell was being edited.
    Idle,
    /// The draft equals the original value; the updater was not called.
    Unchanged,
    /// The updater accepted the new value.
    Committed { cell: CellRef, value: Value },
    /// The draft was rejected before reaching the updater. The cell stays in
    /// edit mode.
    Invalid(ValidationError),
    /// The updater failed. Edit state is cleared, the displayed value stays
    /// at the original until the caller refreshes its data.
    Failed(UpdateError),
    /// A commit for the same cell is still in flight.
    Busy,
}

impl CommitOutcome {
    /// Returns `true` if the cell left edit mode.
    pub fn is_finished(&self) -> bool {
        !matches!(self, CommitOutcome::Invalid(_) | CommitOutcome::Busy)
    }
}

#[derive(Debug, Clone)]
struct ActiveEdit {
    cell: CellRef,
    column: Column,
    original: Value,
    draft: String,
}

#[derive(Debug, Default)]
struct EditInner {
    /// Global toggle: every editable cell renders as an input.
    edit_mode: bool,
    /// The single cell currently being typed into.
    active: Option<ActiveEdit>,
    /// Cells whose commit is awaiting the updater.
    pending: HashSet<CellRef>,
}

/// Per-table edit state machine.
///
/// At most one cell is in `Editing` at a time. Commits await the
/// [`RecordUpdater`]; while they run the cell reports [`CellState::Pending`]
/// and its row cannot start a new edit. Clones share state, so a commit
/// future can outlive the borrow of the view that started it.
///
/// # Example
///
/// ```
/// use docket_lib::edit::{CommitOutcome, EditController, MemoryUpdater};
/// use docket_lib::model::{Column, EditType, Record};
/// use docket_lib::notify::Toasts;
///
/// # async fn run() {
/// let record = Record::new("1").set("name", "Alice");
/// let column = Column::new("name", "Name").editable(EditType::Text);
/// let updater = MemoryUpdater::new(vec![record.clone()]);
/// let toasts = Toasts::new();
///
/// let editor = EditController::new();
/// assert!(editor.begin_edit(&record, &column));
/// editor.set_draft("Alicia");
/// let outcome = editor.commit(&updater, &toasts).await;
/// assert!(matches!(outcome, CommitOutcome::Committed { .. }));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct EditController {
    inner: Arc<RwLock<EditInner>>,
}

impl EditController {
    /// Creates a controller with nothing in edit mode.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, EditInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EditInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Global edit mode
    // -------------------------------------------------------------------------

    /// Whether the global edit-mode toggle is on.
    pub fn edit_mode(&self) -> bool {
        self.read().edit_mode
    }

    /// Turns the global edit mode on or off. Turning it off discards any
    /// uncommitted draft.
    pub fn set_edit_mode(&self, on: bool) {
        let mut guard = self.write();
        guard.edit_mode = on;
        if !on && let Some(active) = guard.active.take() {
            debug!("Edit mode off, discarding draft for {}", active.cell);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// The cell currently being edited.
    pub fn editing(&self) -> Option<CellRef> {
        self.read().active.as_ref().map(|a| a.cell.clone())
    }

    /// The current draft text.
    pub fn draft(&self) -> Option<String> {
        self.read().active.as_ref().map(|a| a.draft.clone())
    }

    /// Returns `true` while a commit for `cell` is in flight.
    pub fn is_pending(&self, cell: &CellRef) -> bool {
        self.read().pending.contains(cell)
    }

    /// Returns `true` while any commit for the row is in flight.
    pub fn is_row_pending(&self, row_id: &str) -> bool {
        self.read().pending.iter().any(|c| c.row_id == row_id)
    }

    /// How `cell` of `column` should render.
    pub fn cell_state(&self, cell: &CellRef, column: &Column) -> CellState {
        let guard = self.read();
        if guard.pending.contains(cell) {
            CellState::Pending
        } else if guard.active.as_ref().is_some_and(|a| a.cell == *cell)
            || (guard.edit_mode && column.editable && column.edit_type != EditType::Status)
        {
            CellState::Editing
        } else {
            CellState::Display
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// `Display → Editing` for one cell.
    ///
    /// Refused for non-editable and status columns, read-only rows, rows
    /// with a commit in flight, and while another cell holds a changed draft.
    /// Commit or cancel that draft first. An untouched draft on another cell
    /// is dropped.
    pub fn begin_edit<R: TableRow>(&self, row: &R, column: &Column) -> bool {
        if !column.editable || column.edit_type == EditType::Status || row.is_read_only() {
            return false;
        }

        let cell = CellRef::new(row.id(), &column.key);
        let mut guard = self.write();
        if guard.pending.iter().any(|c| c.row_id == cell.row_id) {
            debug!("Row {} is updating, not editing {}", cell.row_id, cell);
            return false;
        }
        if let Some(active) = guard.active.as_ref() {
            if active.cell == cell {
                return true;
            }
            if active.draft != active.original.display_string() {
                debug!("{} has an uncommitted draft, not editing {}", active.cell, cell);
                return false;
            }
        }

        let original = row.field(&column.key);
        guard.active = Some(ActiveEdit {
            draft: original.display_string(),
            cell: cell.clone(),
            column: column.clone(),
            original,
        });
        debug!("Editing {}", cell);
        true
    }

    /// Replaces the draft text. Returns `false` if nothing is being edited.
    pub fn set_draft(&self, text: impl Into<String>) -> bool {
        match self.write().active.as_mut() {
            Some(active) => {
                active.draft = text.into();
                true
            }
            None => false,
        }
    }

    /// `Editing → Cancelled → Display`: drops the draft and returns the
    /// original value to show again.
    pub fn cancel(&self) -> Option<Value> {
        let active = self.write().active.take()?;
        debug!("Cancelled edit of {}", active.cell);
        Some(active.original)
    }

    /// `Editing → Committed → Display` (blur or Enter).
    ///
    /// An unchanged draft ends the edit without calling `updater`. An
    /// invalid draft is reported and the cell stays in edit mode. Otherwise
    /// the updater is awaited; failures are pushed to `toasts` and the edit
    /// state is cleared either way.
    pub async fn commit(&self, updater: &dyn RecordUpdater, toasts: &Toasts) -> CommitOutcome {
        let Some(active) = self.read().active.clone() else {
            return CommitOutcome::Idle;
        };

        if active.draft == active.original.display_string() {
            self.finish(&active.cell);
            return CommitOutcome::Unchanged;
        }

        let value = match active
            .column
            .validate(&active.draft)
            .and_then(|()| Value::parse_like(&active.original, &active.draft))
        {
            Ok(value) => value,
            Err(e) => {
                toasts.push(Toast::error(e.to_string()));
                return CommitOutcome::Invalid(e);
            }
        };

        self.run_commit(active.cell, &active.column.label, value, updater, toasts)
            .await
    }

    /// Status gesture: set `column` of `row` to option `value` directly,
    /// skipping `Editing`.
    pub async fn apply_option<R: TableRow>(
        &self,
        row: &R,
        column: &Column,
        value: &str,
        updater: &dyn RecordUpdater,
        toasts: &Toasts,
    ) -> CommitOutcome {
        if let Err(e) = column.validate(value) {
            toasts.push(Toast::error(e.to_string()));
            return CommitOutcome::Invalid(e);
        }
        if !column.editable || !column.edit_type.has_options() || row.is_read_only() {
            debug!("Ignoring status change on {}.{}", row.id(), column.key);
            return CommitOutcome::Idle;
        }
        if row.field(&column.key).display_string() == value {
            return CommitOutcome::Unchanged;
        }

        let cell = CellRef::new(row.id(), &column.key);
        self.run_commit(cell, &column.label, Value::from(value), updater, toasts)
            .await
    }

    async fn run_commit(
        &self,
        cell: CellRef,
        label: &str,
        value: Value,
        updater: &dyn RecordUpdater,
        toasts: &Toasts,
    ) -> CommitOutcome {
        if !self.write().pending.insert(cell.clone()) {
            debug!("Commit for {} already in flight", cell);
            return CommitOutcome::Busy;
        }

        debug!("Committing {} = {}", cell, value);
        let result = updater.update(&cell.row_id, &cell.key, value.clone()).await;

        {
            let mut guard = self.write();
            guard.pending.remove(&cell);
            if guard.active.as_ref().is_some_and(|a| a.cell == cell) {
                guard.active = None;
            }
        }

        match result {
            Ok(()) => CommitOutcome::Committed { cell, value },
            Err(e) => {
                warn!("Failed to update {}: {}", cell, e);
                toasts.push(Toast::error(format!("Failed to update {label}: {e}")));
                CommitOutcome::Failed(e)
            }
        }
    }

    fn finish(&self, cell: &CellRef) {
        let mut guard = self.write();
        if guard.active.as_ref().is_some_and(|a| a.cell == *cell) {
            guard.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::edit::MemoryUpdater;
    use crate::model::{ColumnOption, Record};
    use crate::notify::ToastLevel;

    /// Counts calls and fails when asked to.
    #[derive(Default)]
    struct CountingUpdater {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RecordUpdater for CountingUpdater {
        async fn update(&self, id: &str, _field: &str, _value: Value) -> Result<(), UpdateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(UpdateError::Backend(format!("{id} is locked")))
            } else {
                Ok(())
            }
        }
    }

    /// Blocks until released.
    struct GatedUpdater {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl RecordUpdater for GatedUpdater {
        async fn update(&self, _id: &str, _field: &str, _value: Value) -> Result<(), UpdateError> {
            self.gate.notified().await;
            Ok(())
        }
    }

    fn name_column() -> Column {
        Column::new("name", "Name").editable(EditType::Text)
    }

    fn status_column() -> Column {
        Column::new("status", "Status")
            .editable(EditType::Status)
            .with_options([
                ColumnOption::new("open", "Open"),
                ColumnOption::new("closed", "Closed"),
            ])
    }

    fn alice() -> Record {
        Record::new("1")
            .set("name", "Alice")
            .set("status", "open")
            .set("amount", 500i64)
    }

    #[tokio::test]
    async fn test_unchanged_draft_skips_updater() {
        let editor = EditController::new();
        let updater = CountingUpdater::default();
        let toasts = Toasts::new();

        assert!(editor.begin_edit(&alice(), &name_column()));
        assert_eq!(editor.draft().as_deref(), Some("Alice"));
        let outcome = editor.commit(&updater, &toasts).await;

        assert_eq!(outcome, CommitOutcome::Unchanged);
        assert_eq!(updater.calls.load(Ordering::SeqCst), 0);
        assert_eq!(editor.editing(), None);
    }

    #[tokio::test]
    async fn test_commit_calls_updater_and_clears_state() {
        let record = alice();
        let editor = EditController::new();
        let updater = MemoryUpdater::new(vec![record.clone()]);
        let toasts = Toasts::new();

        editor.begin_edit(&record, &name_column());
        editor.set_draft("Alicia");
        let outcome = editor.commit(&updater, &toasts).await;

        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                cell: CellRef::new("1", "name"),
                value: Value::from("Alicia"),
            }
        );
        assert_eq!(editor.editing(), None);
        assert_eq!(updater.records()[0].get_string("name").unwrap(), Some("Alicia"));
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn test_escape_restores_original() {
        let editor = EditController::new();
        editor.begin_edit(&alice(), &name_column());
        editor.set_draft("something else entirely");
        editor.set_draft("");

        assert_eq!(editor.cancel(), Some(Value::from("Alice")));
        assert_eq!(editor.editing(), None);
        assert_eq!(editor.cancel(), None);
    }

    #[tokio::test]
    async fn test_failure_reports_and_clears() {
        let editor = EditController::new();
        let updater = CountingUpdater {
            fail: true,
            ..Default::default()
        };
        let toasts = Toasts::new();

        editor.begin_edit(&alice(), &name_column());
        editor.set_draft("Alicia");
        let outcome = editor.commit(&updater, &toasts).await;

        assert!(matches!(outcome, CommitOutcome::Failed(UpdateError::Backend(_))));
        assert_eq!(editor.editing(), None);
        let shown = toasts.drain();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, ToastLevel::Error);
        assert!(shown[0].message.contains("Name"));
    }

    #[tokio::test]
    async fn test_invalid_draft_stays_editing() {
        let record = alice();
        let column = Column::new("amount", "Amount").editable(EditType::Text);
        let editor = EditController::new();
        let updater = CountingUpdater::default();
        let toasts = Toasts::new();

        editor.begin_edit(&record, &column);
        editor.set_draft("five hundred");
        let outcome = editor.commit(&updater, &toasts).await;

        assert!(matches!(outcome, CommitOutcome::Invalid(ValidationError::Number { .. })));
        assert!(!outcome.is_finished());
        assert_eq!(editor.editing(), Some(CellRef::new("1", "amount")));
        assert_eq!(updater.calls.load(Ordering::SeqCst), 0);
        assert_eq!(toasts.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_begin_edit_guards() {
        let editor = EditController::new();
        let record = alice();

        assert!(!editor.begin_edit(&record, &Column::new("name", "Name")));
        assert!(!editor.begin_edit(&record, &status_column()));
        assert!(!editor.begin_edit(&record.clone().read_only(), &name_column()));
        assert_eq!(editor.editing(), None);
    }

    #[tokio::test]
    async fn test_only_one_cell_edits_at_a_time() {
        let editor = EditController::new();
        let record = alice();
        let email = Column::new("email", "Email").editable(EditType::Email);

        editor.begin_edit(&record, &name_column());
        editor.set_draft("draft");
        assert!(!editor.begin_edit(&record, &email));
        assert_eq!(editor.editing(), Some(CellRef::new("1", "name")));
        assert_eq!(editor.draft().as_deref(), Some("draft"));

        editor.set_draft("Alice");
        assert!(editor.begin_edit(&record, &email));
        assert_eq!(editor.editing(), Some(CellRef::new("1", "email")));
        assert_eq!(editor.draft().as_deref(), Some(""));
        assert_eq!(
            editor.cell_state(&CellRef::new("1", "name"), &name_column()),
            CellState::Display
        );
    }

    #[tokio::test]
    async fn test_edit_mode_renders_all_editable_cells_as_inputs() {
        let editor = EditController::new();
        editor.set_edit_mode(true);

        let cell = CellRef::new("1", "name");
        assert_eq!(editor.cell_state(&cell, &name_column()), CellState::Editing);
        assert_eq!(
            editor.cell_state(&CellRef::new("1", "status"), &status_column()),
            CellState::Display
        );
        assert_eq!(
            editor.cell_state(&cell, &Column::new("name", "Name")),
            CellState::Display
        );

        editor.begin_edit(&alice(), &name_column());
        editor.set_edit_mode(false);
        assert_eq!(editor.editing(), None);
    }

    #[tokio::test]
    async fn test_apply_option_skips_editing() {
        let record = alice();
        let editor = EditController::new();
        let updater = MemoryUpdater::new(vec![record.clone()]);
        let toasts = Toasts::new();

        let outcome = editor
            .apply_option(&record, &status_column(), "closed", &updater, &toasts)
            .await;
        assert!(matches!(outcome, CommitOutcome::Committed { .. }));
        assert_eq!(updater.records()[0].get_string("status").unwrap(), Some("closed"));

        let same = editor
            .apply_option(&record, &status_column(), "open", &updater, &toasts)
            .await;
        assert_eq!(same, CommitOutcome::Unchanged);

        let bad = editor
            .apply_option(&record, &status_column(), "archived", &updater, &toasts)
            .await;
        assert!(matches!(bad, CommitOutcome::Invalid(ValidationError::UnknownOption { .. })));
    }

    #[tokio::test]
    async fn test_pending_commit_blocks_row() {
        let record = alice();
        let editor = EditController::new();
        let gate = Arc::new(Notify::new());
        let updater = GatedUpdater { gate: gate.clone() };
        let toasts = Toasts::new();

        editor.begin_edit(&record, &name_column());
        editor.set_draft("Alicia");

        let background = editor.clone();
        let handle = tokio::spawn(async move {
            let toasts = Toasts::new();
            background.commit(&updater, &toasts).await
        });

        let cell = CellRef::new("1", "name");
        while !editor.is_pending(&cell) {
            tokio::task::yield_now().await;
        }
        assert_eq!(editor.cell_state(&cell, &name_column()), CellState::Pending);
        assert!(editor.is_row_pending("1"));
        let email = Column::new("email", "Email").editable(EditType::Email);
        assert!(!editor.begin_edit(&record, &email));

        let second = editor
            .apply_option(&record, &status_column(), "closed", &CountingUpdater::default(), &toasts)
            .await;
        assert!(matches!(second, CommitOutcome::Committed { .. }));

        gate.notify_one();
        let outcome = handle.await.unwrap();
        assert!(matches!(outcome, CommitOutcome::Committed { .. }));
        assert!(!editor.is_pending(&cell));
        assert_eq!(editor.editing(), None);
    }
}
