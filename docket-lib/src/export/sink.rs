//! Where export artifacts go.

use std::path::Path;
use std::path::PathBuf;

use log::debug;

use crate::error::ExportError;

/// Receives a finished delimited-text export.
pub trait DownloadSink {
    /// Stores `contents` under `file_name` and returns where it went.
    fn deliver(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError>;
}

/// Shows a finished print document to the user.
pub trait DocumentViewer {
    /// Displays the document. `file_name` is a suggested name for it.
    fn show(&self, file_name: &str, html: &str) -> Result<PathBuf, ExportError>;
}

fn write_file(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(file_name);
    std::fs::create_dir_all(dir)
        .and_then(|()| std::fs::write(&path, contents))
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(path)
}

/// Writes downloads into a directory, overwriting files of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
        write_file(&self.dir, file_name, contents)
    }
}

/// Writes the document to a directory and hands it to the platform's
/// default browser.
#[derive(Debug, Clone)]
pub struct BrowserViewer {
    dir: PathBuf,
}

impl Default for BrowserViewer {
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }
}

impl BrowserViewer {
    /// Viewer that writes into `dir` instead of the temp directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentViewer for BrowserViewer {
    fn show(&self, file_name: &str, html: &str) -> Result<PathBuf, ExportError> {
        let path = write_file(&self.dir, file_name, html)?;
        open::that(&path).map_err(|source| ExportError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
