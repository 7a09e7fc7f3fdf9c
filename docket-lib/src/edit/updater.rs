//! Persistence seam for committed edits.

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::UpdateError;
use crate::model::Record;
use crate::model::Value;

/// Receives committed cell edits.
///
/// This is the table engine's only way to persist anything. Implementations
/// talk to the real backend; the engine awaits the result and reports
/// failures, it never retries or rolls back.
#[async_trait]
pub trait RecordUpdater: Send + Sync {
    /// Sets `field` of record `id` to `value`.
    async fn update(&self, id: &str, field: &str, value: Value) -> Result<(), UpdateError>;
}

/// An updater that applies edits to an in-memory record set.
///
/// Clones share the same records. Read-only records reject updates.
///
/// # Example
///
/// ```
/// use docket_lib::edit::MemoryUpdater;
/// use docket_lib::model::Record;
///
/// let updater = MemoryUpdater::new(vec![Record::new("1").set("name", "Alice")]);
/// assert_eq!(updater.records()[0].get_string("name").unwrap(), Some("Alice"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryUpdater {
    records: Arc<RwLock<Vec<Record>>>,
}

impl MemoryUpdater {
    /// Wraps a record set.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Snapshot of the current records.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RecordUpdater for MemoryUpdater {
    async fn update(&self, id: &str, field: &str, value: Value) -> Result<(), UpdateError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| UpdateError::not_found(id))?;

        if record.read_only {
            return Err(UpdateError::rejected(id, field, "record is read-only"));
        }

        log::debug!("Updating {}.{} = {}", id, field, value);
        record.insert(field, value);
        Ok(())
    }
}
