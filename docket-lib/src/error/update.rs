//! Errors returned by the persistence collaborator

/// Error reported by a [`RecordUpdater`](crate::edit::RecordUpdater).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateError {
    /// No record with the given id exists in the backing store.
    #[error("Record '{id}' not found")]
    NotFound { id: String },

    /// The backend refused the change (permissions, constraint, ...).
    #[error("Update of '{field}' on record '{id}' rejected: {message}")]
    Rejected {
        id: String,
        field: String,
        message: String,
    },

    /// Transport or backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl UpdateError {
    /// Creates a new not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new rejection error.
    pub fn rejected(id: impl Into<String>, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            id: id.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}
