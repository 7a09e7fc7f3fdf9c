//! Printable HTML document.

use std::fmt::Write;

use chrono::DateTime;
use chrono::Local;

use super::delimited::format_cell;
use super::delimited::format_date;
use crate::config::ExportConfig;
use crate::model::Column;
use crate::model::TableRow;
use crate::model::Value;

const STYLE: &str = "\
body { font-family: Georgia, 'Times New Roman', serif; color: #1a1a1a; margin: 32px; }
header.brand { border-bottom: 2px solid #1f3a5f; padding-bottom: 8px; margin-bottom: 24px; }
header.brand .name { font-size: 22px; font-weight: bold; color: #1f3a5f; }
header.brand .tagline { font-size: 12px; color: #555; }
h1 { font-size: 18px; margin: 0 0 4px 0; }
.meta { font-size: 12px; color: #555; margin-bottom: 16px; }
table { width: 100%; border-collapse: collapse; font-size: 12px; }
th { text-align: left; background: #1f3a5f; color: #fff; padding: 6px 8px; }
td { padding: 6px 8px; border-bottom: 1px solid #ddd; }
tbody tr:nth-child(even) { background: #f3f5f8; }
footer { margin-top: 24px; font-size: 11px; color: #777; border-top: 1px solid #ddd; padding-top: 8px; }
@media print { body { margin: 0; } }
";

/// Renders `rows` as a self-contained HTML document ready for printing.
///
/// Option columns show their labels instead of the stored values.
pub fn to_print_document<R: TableRow>(
    rows: &[&R],
    columns: &[Column],
    title: &str,
    config: &ExportConfig,
    generated_at: DateTime<Local>,
) -> String {
    let mut html = String::new();
    let title = escape_html(title);

    // Writing into a String never fails.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n"
    );
    let _ = write!(
        html,
        "<header class=\"brand\">\n<div class=\"name\">{}</div>\n\
         <div class=\"tagline\">{}</div>\n</header>\n",
        escape_html(&config.brand),
        escape_html(&config.tagline),
    );

    let count = rows.len();
    let noun = if count == 1 { "record" } else { "records" };
    let _ = write!(
        html,
        "<h1>{title}</h1>\n<div class=\"meta\">Generated {} &middot; {count} {noun}</div>\n",
        escape_html(&format_date(generated_at.date_naive(), &config.date_format)),
    );

    html.push_str("<table>\n<thead>\n<tr>");
    for column in columns {
        let _ = write!(html, "<th>{}</th>", escape_html(&column.label));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for column in columns {
            let value = row.field(&column.key);
            let _ = write!(html, "<td>{}</td>", escape_html(&cell_text(&value, column, config)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    let _ = write!(
        html,
        "<footer>{}</footer>\n</body>\n</html>\n",
        escape_html(&config.footer)
    );
    html
}

fn cell_text(value: &Value, column: &Column, config: &ExportConfig) -> String {
    let text = format_cell(value, config);
    match column.option_label(&text) {
        Some(label) if column.edit_type.has_options() => label.to_string(),
        _ => text,
    }
}

/// Escapes `& < > " '` for HTML text and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::{ColumnOption, EditType, Record};

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("status", "Status")
                .editable(EditType::Select)
                .with_options([ColumnOption::new("in_progress", "In Progress")]),
        ]
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Smith" & O'Neil</b>"#),
            "&lt;b&gt;&quot;Smith&quot; &amp; O&#39;Neil&lt;/b&gt;"
        );
    }

    #[test]
    fn test_document_structure() {
        let rows = vec![
            Record::new("1").set("name", "Alice").set("status", "in_progress"),
            Record::new("2").set("name", "<script>").set("status", "unknown"),
        ];
        let refs: Vec<&Record> = rows.iter().collect();
        let config = ExportConfig::default().with_brand("Smith & Partners", "Attorneys at Law");

        let html = to_print_document(&refs, &columns(), "Open Cases", &config, generated_at());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Open Cases</title>"));
        assert!(html.contains("Smith &amp; Partners"));
        assert!(html.contains("Generated 06/01/2024 &middot; 2 records"));
        assert!(html.contains("<th>Name</th><th>Status</th>"));
        assert!(html.contains("<td>Alice</td><td>In Progress</td>"));
        assert!(html.contains("<td>&lt;script&gt;</td><td>unknown</td>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("nth-child(even)"));
        assert!(html.contains(&config.footer));
    }

    #[test]
    fn test_invalid_date_format_in_header() {
        let config = ExportConfig::default().with_date_format("%Q");
        let html = to_print_document::<Record>(&[], &columns(), "Cases", &config, generated_at());
        assert!(html.contains("Generated 2024-06-01 &middot; 0 records"));
    }

    #[test]
    fn test_empty_document_still_has_header_row() {
        let html = to_print_document::<Record>(
            &[],
            &columns(),
            "Nothing",
            &ExportConfig::default(),
            generated_at(),
        );
        assert!(html.contains("0 records"));
        assert!(html.contains("<tbody>\n</tbody>"));
    }
}
