//! FieldError for Record accessors

/// Error reading a typed field out of a [`Record`](crate::model::Record).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The field is absent or null where a value is required.
    #[error("Record '{id}' has no '{field}'")]
    Missing { id: String, field: String },

    /// The field holds a value that does not convert to the requested type.
    #[error("Field '{field}' of record '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: String,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Missing {
            id: id.into(),
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        id: impl Into<String>,
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            id: id.into(),
            field: field.into(),
            expected,
            actual,
        }
    }
}
