//! Configuration loading errors

use std::path::PathBuf;

/// Error raised while loading a [`TableConfig`](crate::config::TableConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid date format '{format}'")]
    DateFormat { format: String },
}
