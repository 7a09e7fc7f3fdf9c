//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "docket";
const APPLICATION: &str = "docket";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory, home of the logs.
///
/// - Linux: `$XDG_CACHE_HOME/docket` or `~/.cache/docket`
/// - macOS: `~/Library/Caches/dev.docket.docket`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/docket` or `~/.config/docket`
/// - macOS: `~/Library/Application Support/dev.docket.docket`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default table config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Path of the current log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archives `latest.log` under a timestamp and prunes old logs.
///
/// Call at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache);
}

fn rotate_logs_in(dir: &Path) {
    let latest = dir.join("latest.log");
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{timestamp}.log")));
    }

    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    if logs.len() > MAX_OLD_LOGS {
        for entry in logs.iter().take(logs.len() - MAX_OLD_LOGS) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
