//! Delimited-text import.
//!
//! The inverse of the delimited export. Reading is done by the `csv` crate,
//! so quoted fields, doubled quotes and line breaks inside quotes load back
//! unchanged. Cell text is typed again on the way in: numbers, dates and
//! booleans written by the export come back as the same kind of [`Value`].

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use csv::ReaderBuilder;
use csv::StringRecord;
use log::debug;
use rust_decimal::Decimal;

use crate::config::ExportConfig;
use crate::error::ImportError;
use crate::model::Column;
use crate::model::Record;
use crate::model::Value;

fn reader(text: &str, delimiter: char) -> Result<csv::Reader<&[u8]>, ImportError> {
    let byte = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(ImportError::Delimiter { delimiter })?;
    Ok(ReaderBuilder::new()
        .delimiter(byte)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes()))
}

fn read_record(result: csv::Result<StringRecord>) -> Result<StringRecord, ImportError> {
    result.map_err(|e| ImportError::Parse {
        line: e.position().map_or(0, |p| p.line()),
        message: e.to_string(),
    })
}

/// Splits delimited text into rows of fields.
///
/// Both `\n` and `\r\n` end a row. Blank lines and a trailing line break do
/// not produce rows.
///
/// # Example
///
/// ```
/// use docket_lib::import::parse_delimited;
///
/// let rows = parse_delimited("Name,Note\n\"Smith, Jane\",\"say \"\"hi\"\"\"\n", ',').unwrap();
/// assert_eq!(rows[1], vec!["Smith, Jane", "say \"hi\""]);
/// ```
pub fn parse_delimited(text: &str, delimiter: char) -> Result<Vec<Vec<String>>, ImportError> {
    reader(text, delimiter)?
        .records()
        .map(|result| read_record(result).map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

/// Parses delimited text into records.
///
/// Header cells are matched against column labels, then column keys; cells
/// under unknown headers are kept under the header text. The header mapping
/// to `id_key` supplies record ids. Cells are typed with [`infer_value`].
pub fn records_from_delimited(
    text: &str,
    columns: &[Column],
    id_key: &str,
    config: &ExportConfig,
) -> Result<Vec<Record>, ImportError> {
    let mut rows = reader(text, config.delimiter)?.into_records();
    let header = read_record(rows.next().ok_or(ImportError::Empty)?)?;

    let keys: Vec<String> = header
        .iter()
        .map(|cell| {
            let cell = cell.trim();
            columns
                .iter()
                .find(|c| c.label == cell)
                .or_else(|| columns.iter().find(|c| c.key == cell))
                .map_or_else(|| cell.to_string(), |c| c.key.clone())
        })
        .collect();
    let id_index = keys
        .iter()
        .position(|k| k == id_key)
        .ok_or_else(|| ImportError::MissingIdColumn {
            id_key: id_key.to_string(),
        })?;

    let mut records = Vec::new();
    for result in rows {
        let cells = read_record(result)?;
        let id = cells.get(id_index).map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(ImportError::EmptyId {
                line: cells.position().map_or(0, |p| p.line()),
            });
        }

        let mut record = Record::new(id);
        for (key, cell) in keys.iter().zip(cells.iter()) {
            if key != id_key {
                record.insert(key.as_str(), infer_value(cell, config));
            }
        }
        records.push(record);
    }

    debug!("Imported {} records", records.len());
    Ok(records)
}

/// Types one imported cell.
///
/// Empty cells are null. Plain integers become `Int` and plain decimals
/// `Decimal`; digits with a leading zero (zip codes, account numbers) stay
/// text. Dates are read with the export date format, then as ISO-8601, and
/// RFC 3339 timestamps as `DateTime`. `true` and `false` are booleans.
/// Anything else is a string.
pub fn infer_value(cell: &str, config: &ExportConfig) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if is_plain_number(cell) {
        if let Ok(n) = cell.parse::<i64>() {
            return Value::Int(n);
        }
        if let Ok(d) = cell.parse::<Decimal>() {
            return Value::Decimal(d);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(cell, &config.date_format)
        .or_else(|_| NaiveDate::parse_from_str(cell, "%Y-%m-%d"))
    {
        return Value::Date(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Value::DateTime(dt.with_timezone(&Utc));
    }
    match cell {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}

fn is_plain_number(cell: &str) -> bool {
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole)
        && !(whole.len() > 1 && whole.starts_with('0'))
        && fraction.is_none_or(all_digits)
}
