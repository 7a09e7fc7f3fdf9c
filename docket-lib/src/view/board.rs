//! Status board: rows grouped into lanes by a status column.

use crate::model::Column;
use crate::model::ColumnOption;
use crate::model::TableRow;

/// One lane of the board, in the column's option order.
#[derive(Debug, Clone)]
pub struct Lane<'a, R> {
    pub option: &'a ColumnOption,
    pub rows: Vec<&'a R>,
}

/// Rows of a view grouped by the value of a `status`/`select` column.
#[derive(Debug, Clone)]
pub struct Board<'a, R> {
    pub lanes: Vec<Lane<'a, R>>,
    /// Rows whose value matches none of the options.
    pub unassigned: Vec<&'a R>,
}

impl<'a, R: TableRow> Board<'a, R> {
    /// Groups `rows` by `column`, keeping the incoming row order inside each lane.
    pub fn new(rows: &[&'a R], column: &'a Column) -> Self {
        let mut lanes: Vec<Lane<'a, R>> = column
            .options
            .iter()
            .map(|option| Lane {
                option,
                rows: Vec::new(),
            })
            .collect();
        let mut unassigned = Vec::new();

        for row in rows {
            let value = row.field(&column.key).display_string();
            match lanes.iter_mut().find(|lane| lane.option.value == value) {
                Some(lane) => lane.rows.push(*row),
                None => unassigned.push(*row),
            }
        }

        Self { lanes, unassigned }
    }

    /// Returns the lane for an option value.
    pub fn lane(&self, value: &str) -> Option<&Lane<'a, R>> {
        self.lanes.iter().find(|lane| lane.option.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EditType, Record};

    #[test]
    fn test_groups_rows_by_option() {
        let column = Column::new("status", "Status")
            .editable(EditType::Status)
            .with_options([
                ColumnOption::new("open", "Open"),
                ColumnOption::new("closed", "Closed"),
            ]);
        let rows = vec![
            Record::new("1").set("status", "open"),
            Record::new("2").set("status", "closed"),
            Record::new("3").set("status", "open"),
            Record::new("4").set("status", "archived"),
        ];
        let refs: Vec<&Record> = rows.iter().collect();
        let board = Board::new(&refs, &column);

        let open: Vec<&str> = board.lane("open").unwrap().rows.iter().map(|r| r.id()).collect();
        assert_eq!(open, ["1", "3"]);
        assert_eq!(board.lane("closed").unwrap().rows.len(), 1);
        assert_eq!(board.unassigned.len(), 1);
        assert_eq!(board.lanes[0].option.label, "Open");
    }
}
