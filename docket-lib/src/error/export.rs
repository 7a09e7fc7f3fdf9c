//! Export delivery errors

use std::path::PathBuf;

/// Error raised while delivering an export artifact.
///
/// The export functions in [`crate::export`] log these and degrade to a
/// no-op; sinks and viewers return them so callers can log context.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing the artifact failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform opener could not show the document.
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
