//! Plain-text rendering of table pages and status boards.

use docket_lib::model::Column;
use docket_lib::model::TableRow;
use docket_lib::view::Board;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Widest a cell may be before it is cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 32;

const GAP: &str = "  ";

/// Text shown for a cell: option columns show labels.
pub fn cell_text<R: TableRow>(row: &R, column: &Column) -> String {
    let value = row.field(&column.key).display_string();
    if column.edit_type.has_options()
        && let Some(label) = column.option_label(&value)
    {
        return label.to_string();
    }
    value
}

/// Cuts `text` to at most `max` terminal columns.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Renders rows as aligned columns under a header and a rule.
pub fn render_table<R: TableRow>(rows: &[&R], columns: &[Column]) -> String {
    let header: Vec<String> = columns
        .iter()
        .map(|c| truncate(&c.label, MAX_CELL_WIDTH))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| truncate(&cell_text(*row, c), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].width())
                .chain(std::iter::once(header[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        padded.join(GAP).trim_end().to_string()
    };

    let mut out = line(&header);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join(GAP));
    out.push('\n');
    for cells in &body {
        out.push_str(&line(cells));
        out.push('\n');
    }
    out
}

/// Renders a status board, one block per lane, cards titled by `title`.
pub fn render_board<R: TableRow>(board: &Board<'_, R>, title: &Column) -> String {
    let mut out = String::new();

    for lane in &board.lanes {
        out.push_str(&format!("{} ({})\n", lane.option.label, lane.rows.len()));
        for row in &lane.rows {
            out.push_str(&card(*row, title));
        }
    }
    if !board.unassigned.is_empty() {
        out.push_str(&format!("Unassigned ({})\n", board.unassigned.len()));
        for row in &board.unassigned {
            out.push_str(&card(*row, title));
        }
    }
    out
}

fn card<R: TableRow>(row: &R, title: &Column) -> String {
    format!(
        "  [{}] {}\n",
        row.id(),
        truncate(&cell_text(row, title), MAX_CELL_WIDTH)
    )
}

#[cfg(test)]
mod tests {
    use docket_lib::model::{ColumnOption, EditType, Record};

    use super::*;

    fn status() -> Column {
        Column::new("status", "Status")
            .editable(EditType::Select)
            .with_options([
                ColumnOption::new("open", "Open"),
                ColumnOption::new("closed", "Closed"),
            ])
    }

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            Record::new("1").set("name", "Alice").set("status", "open"),
            Record::new("2").set("name", "Bartholomew").set("status", "gone"),
        ];
        let refs: Vec<&Record> = rows.iter().collect();
        let columns = vec![Column::new("name", "Name"), status()];

        let text = render_table(&refs, &columns);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name         Status");
        assert_eq!(lines[1], "-----------  ------");
        assert_eq!(lines[2], "Alice        Open");
        assert_eq!(lines[3], "Bartholomew  gone");
    }

    #[test]
    fn test_render_board() {
        let rows = vec![
            Record::new("1").set("name", "Alice").set("status", "open"),
            Record::new("2").set("name", "Bob").set("status", "archived"),
        ];
        let refs: Vec<&Record> = rows.iter().collect();
        let column = status();
        let board = Board::new(&refs, &column);

        let text = render_board(&board, &Column::new("name", "Name"));
        assert_eq!(
            text,
            "Open (1)\n  [1] Alice\nClosed (0)\nUnassigned (1)\n  [2] Bob\n"
        );
    }
}
