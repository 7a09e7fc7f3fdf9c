//! Loading and saving the JSON files the commands work on.

use std::collections::BTreeSet;
use std::path::Path;

use docket_lib::config::TableConfig;
use docket_lib::model::Column;
use docket_lib::model::EditType;
use docket_lib::model::Record;
use log::debug;
use serde::de::DeserializeOwned;

use crate::error::CliError;
use crate::paths;

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    serde_json::from_str(&read(path)?).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads text input.
pub fn read_text(path: &Path) -> Result<String, CliError> {
    read(path)
}

/// Reads a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<Record>, CliError> {
    let records: Vec<Record> = read_json(path)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Writes records back as pretty JSON.
pub fn save_records(path: &Path, records: &[Record]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(records).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json + "\n").map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Columns from a JSON file, or one editable text column per field found in
/// the records.
pub fn load_columns(path: Option<&Path>, records: &[Record]) -> Result<Vec<Column>, CliError> {
    match path {
        Some(path) => read_json(path),
        None => Ok(derive_columns(records)),
    }
}

fn derive_columns(records: &[Record]) -> Vec<Column> {
    let keys: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.fields().keys().map(String::as_str))
        .collect();
    keys.into_iter()
        .map(|key| Column::new(key, key).sortable().editable(EditType::Text))
        .collect()
}

/// The table config from `--config`, else the user's config file, else
/// defaults.
pub fn load_config(path: Option<&Path>) -> Result<TableConfig, CliError> {
    if let Some(path) = path {
        return Ok(TableConfig::load(path)?);
    }
    match paths::config_file() {
        Some(path) if path.exists() => Ok(TableConfig::load(&path)?),
        _ => Ok(TableConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "Alice"}, {"id": "2", "email": null}]"#)
            .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records[0].id(), "1");
        save_records(&path, &records).unwrap();
        assert_eq!(load_records(&path).unwrap(), records);
    }

    #[test]
    fn test_derived_columns_are_sorted_union() {
        let records = vec![
            Record::new("1").set("name", "Alice"),
            Record::new("2").set("email", "b@example.com").set("name", "Bob"),
        ];
        let columns = load_columns(None, &records).unwrap();
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["email", "name"]);
        assert!(columns.iter().all(|c| c.sortable && c.editable));
    }

    #[test]
    fn test_bad_json_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
