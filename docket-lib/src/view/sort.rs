//! Sort stage: single-key ordering.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::TableRow;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// The active sort of a table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Field the rows are ordered by.
    pub key: String,
    /// Order direction.
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a field.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// Header-click transition: same key flips, a new key starts ascending.
    pub fn toggled(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(sort) if sort.key == key => SortState {
                key: sort.key.clone(),
                direction: sort.direction.flipped(),
            },
            _ => SortState::asc(key),
        }
    }
}

/// Orders `rows` in place by the sort key.
///
/// The sort is stable: rows with equal keys keep the order the filter stage
/// produced, in both directions. Null and missing values always come last.
/// Without a sort the input order is untouched.
pub fn sort<R: TableRow>(rows: &mut Vec<&R>, sort: Option<&SortState>) {
    let Some(sort) = sort else {
        return;
    };

    let mut keyed: Vec<(Value, &R)> = rows.iter().map(|row| (row.field(&sort.key), *row)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare(a, b, sort.direction));
    *rows = keyed.into_iter().map(|(_, row)| row).collect();
}

fn compare(a: &Value, b: &Value, direction: Direction) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            Direction::Asc => a.sort_cmp(b),
            Direction::Desc => b.sort_cmp(a),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn rows() -> Vec<Record> {
        vec![
            Record::new("1").set("name", "Alice").set("amount", 500i64),
            Record::new("2").set("name", "bob").set("amount", 50i64),
            Record::new("3").set("name", "Carol"),
            Record::new("4").set("name", "dave").set("amount", 500i64),
        ]
    }

    fn sorted(rows: &[Record], sort_state: Option<&SortState>) -> Vec<String> {
        let mut refs: Vec<&Record> = rows.iter().collect();
        sort(&mut refs, sort_state);
        refs.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_no_sort_preserves_order() {
        assert_eq!(sorted(&rows(), None), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_numeric_ascending_and_descending() {
        let rows = rows();
        assert_eq!(sorted(&rows, Some(&SortState::asc("amount"))), ["2", "1", "4", "3"]);
        assert_eq!(sorted(&rows, Some(&SortState::desc("amount"))), ["1", "4", "2", "3"]);
    }

    #[test]
    fn test_strings_are_case_sensitive_lexicographic() {
        assert_eq!(
            sorted(&rows(), Some(&SortState::asc("name"))),
            ["1", "3", "2", "4"]
        );
    }

    #[test]
    fn test_toggle_cycle() {
        let first = SortState::toggled(None, "amount");
        assert_eq!(first, SortState::asc("amount"));
        let second = SortState::toggled(Some(&first), "amount");
        assert_eq!(second.direction, Direction::Desc);
        let third = SortState::toggled(Some(&second), "amount");
        assert_eq!(third, first);
        let other = SortState::toggled(Some(&second), "name");
        assert_eq!(other, SortState::asc("name"));
    }

    #[test]
    fn test_double_toggle_restores_ascending_result() {
        let rows = rows();
        let asc = SortState::toggled(None, "amount");
        let desc = SortState::toggled(Some(&asc), "amount");
        let back = SortState::toggled(Some(&desc), "amount");
        assert_eq!(sorted(&rows, Some(&asc)), sorted(&rows, Some(&back)));
    }
}
