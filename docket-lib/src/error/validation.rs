//! Validation error types

/// A draft value that cannot be committed to its column.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The draft is not a valid email address.
    #[error("'{value}' is not a valid email address")]
    Email { value: String },

    /// The draft is not a valid phone number.
    #[error("'{value}' is not a valid phone number")]
    Phone { value: String },

    /// The draft does not parse as a number but the field is numeric.
    #[error("'{value}' is not a number")]
    Number { value: String },

    /// The field is boolean and the draft is neither `true` nor `false`.
    #[error("'{value}' is not true or false")]
    Bool { value: String },

    /// The draft does not parse as a `YYYY-MM-DD` date but the field is a date.
    #[error("'{value}' is not a date (expected YYYY-MM-DD)")]
    Date { value: String },

    /// The draft is not an RFC 3339 timestamp but the field is a timestamp.
    #[error("'{value}' is not a timestamp (expected e.g. 2024-06-01T09:00:00Z)")]
    DateTime { value: String },

    /// The draft is not valid JSON but the field holds structured data.
    #[error("'{value}' is not valid JSON")]
    Json { value: String },

    /// The value is not one of the column's options.
    #[error("'{value}' is not an option of '{column}'")]
    UnknownOption { column: String, value: String },
}
