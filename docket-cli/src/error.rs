//! CLI errors

use std::path::PathBuf;

use docket_lib::error::ConfigError;
use docket_lib::error::FieldError;
use docket_lib::error::ImportError;
use docket_lib::error::UpdateError;
use docket_lib::error::ValidationError;

/// Everything that can stop a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{0}' is not sortable")]
    NotSortable(String),

    #[error("Column '{0}' has no options")]
    NotABoard(String),

    #[error("No record with id '{0}'")]
    UnknownRecord(String),

    #[error("'{field}' of record '{id}' cannot be edited")]
    NotEditable { id: String, field: String },

    #[error("Export failed, see the log for details")]
    ExportFailed,
}
