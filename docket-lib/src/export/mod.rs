//! Export adapter.
//!
//! Turns the current filtered and sorted rows (every page, not just the
//! visible one) into a delimited-text download or a printable document.
//! Delivery problems never surface as errors: they are logged and the
//! export becomes a no-op.

mod delimited;
mod print;
mod sink;
mod slug;

use std::path::PathBuf;

use chrono::Local;
use log::info;
use log::warn;

pub use delimited::*;
pub use print::*;
pub use sink::*;
pub use slug::*;

use crate::config::ExportConfig;
use crate::model::Column;
use crate::model::TableRow;

/// Builds the delimited export and hands it to `sink` as `<slug>.csv`.
///
/// Returns where the file went, or `None` if delivery failed.
pub fn export_csv<R: TableRow>(
    rows: &[&R],
    columns: &[Column],
    title: &str,
    config: &ExportConfig,
    sink: &dyn DownloadSink,
) -> Option<PathBuf> {
    let contents = to_delimited(rows, columns, config);
    match sink.deliver(&csv_file_name(title), &contents) {
        Ok(path) => {
            info!("Exported {} rows to {}", rows.len(), path.display());
            Some(path)
        }
        Err(e) => {
            warn!("CSV export of '{}' failed: {}", title, e);
            None
        }
    }
}

/// Builds the print document and hands it to `viewer`.
///
/// Returns `false` if the document could not be shown.
pub fn export_print<R: TableRow>(
    rows: &[&R],
    columns: &[Column],
    title: &str,
    config: &ExportConfig,
    viewer: &dyn DocumentViewer,
) -> bool {
    let html = to_print_document(rows, columns, title, config, Local::now());
    match viewer.show(&print_file_name(title), &html) {
        Ok(path) => {
            info!("Opened print view of {} rows at {}", rows.len(), path.display());
            true
        }
        Err(e) => {
            warn!("Print export of '{}' failed: {}", title, e);
            false
        }
    }
}
