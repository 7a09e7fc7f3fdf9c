//! Delimited-text export.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::ExportConfig;
use crate::model::Column;
use crate::model::TableRow;
use crate::model::Value;

/// Renders `rows` as delimited text: a header line of column labels, then
/// one line per row.
///
/// # Example
///
/// ```
/// use docket_lib::config::ExportConfig;
/// use docket_lib::export::to_delimited;
/// use docket_lib::model::{Column, Record};
///
/// let rows = vec![Record::new("1").set("name", "Smith, Jane")];
/// let refs: Vec<&Record> = rows.iter().collect();
/// let columns = vec![Column::new("name", "Name")];
///
/// let csv = to_delimited(&refs, &columns, &ExportConfig::default());
/// assert_eq!(csv, "Name\n\"Smith, Jane\"\n");
/// ```
pub fn to_delimited<R: TableRow>(rows: &[&R], columns: &[Column], config: &ExportConfig) -> String {
    let delimiter = config.delimiter;
    let mut out = String::new();

    push_line(
        &mut out,
        columns.iter().map(|c| Cow::Borrowed(c.label.as_str())),
        delimiter,
    );
    for row in rows {
        push_line(
            &mut out,
            columns
                .iter()
                .map(|c| Cow::Owned(format_cell(&row.field(&c.key), config))),
            delimiter,
        );
    }

    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = Cow<'a, str>>, delimiter: char) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(&escape_field(&cell, delimiter));
    }
    out.push('\n');
}

/// Stringifies one cell for export.
///
/// Dates use the configured date format (timestamps keep only their date),
/// nested values are compact JSON, null is empty.
pub fn format_cell(value: &Value, config: &ExportConfig) -> String {
    match value {
        Value::Date(d) => format_date(*d, &config.date_format),
        Value::DateTime(dt) => format_date(dt.date_naive(), &config.date_format),
        other => other.display_string(),
    }
}

/// Formats a date with a `strftime` pattern, falling back to ISO-8601 when
/// the pattern is invalid.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        log::warn!("Invalid date format '{format}', using ISO-8601");
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Quotes a field containing the delimiter, a quote or a line break,
/// doubling internal quotes.
pub fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
