//! Delimited import errors

/// Error raised while turning delimited text into records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    /// The input had no header row.
    #[error("Input is empty")]
    Empty,

    /// The header row has no column mapping to the id field.
    #[error("No '{id_key}' column in header")]
    MissingIdColumn { id_key: String },

    /// A data row has an empty id.
    #[error("Row on line {line} has an empty id")]
    EmptyId { line: u64 },

    /// The reader could not parse a row.
    #[error("Malformed input on line {line}: {message}")]
    Parse { line: u64, message: String },

    /// The reader only splits on single-byte ASCII delimiters.
    #[error("Delimiter '{delimiter}' is not an ASCII character")]
    Delimiter { delimiter: char },
}
