//! Search stage: case-insensitive substring match on one field.

use crate::model::TableRow;

/// Returns the rows whose `field` contains `search`, ignoring case.
///
/// An empty search or no search field yields every row. Relative order is
/// always preserved.
///
/// # Example
///
/// ```
/// use docket_lib::model::Record;
/// use docket_lib::view::filter;
///
/// let rows = vec![
///     Record::new("1").set("name", "Alice"),
///     Record::new("2").set("name", "bob"),
/// ];
/// let hits = filter(&rows, Some("name"), "B");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id(), "2");
/// ```
pub fn filter<'a, R: TableRow>(rows: &'a [R], field: Option<&str>, search: &str) -> Vec<&'a R> {
    let Some(field) = field.filter(|_| !search.is_empty()) else {
        return rows.iter().collect();
    };

    let needle = search.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.field(field)
                .display_string()
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Value};

    fn rows() -> Vec<Record> {
        vec![
            Record::new("1").set("name", "Alice").set("amount", 500i64),
            Record::new("2").set("name", "bob").set("amount", 50i64),
            Record::new("3").set("name", "Bobby Tables").set("amount", Value::Null),
            Record::new("4").set("amount", 5i64),
        ]
    }

    fn ids<R: TableRow>(rows: &[&R]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_empty_search_returns_all_in_order() {
        let rows = rows();
        assert_eq!(ids(&filter(&rows, Some("name"), "")), ["1", "2", "3", "4"]);
        assert_eq!(ids(&filter(&rows, None, "bob")), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let rows = rows();
        assert_eq!(ids(&filter(&rows, Some("name"), "BOB")), ["2", "3"]);
        assert_eq!(ids(&filter(&rows, Some("name"), "b")), ["2", "3"]);
    }

    #[test]
    fn test_numbers_match_on_string_coercion() {
        let rows = rows();
        assert_eq!(ids(&filter(&rows, Some("amount"), "50")), ["1", "2"]);
    }

    #[test]
    fn test_missing_field_never_matches() {
        let rows = rows();
        assert_eq!(ids(&filter(&rows, Some("name"), "a")), ["1", "3"]);
        assert!(filter(&rows, Some("nope"), "a").is_empty());
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let rows = rows();
        for search in ["a", "b", "o", "x", "5"] {
            let hits = filter(&rows, Some("name"), search);
            let positions: Vec<usize> = hits
                .iter()
                .map(|hit| rows.iter().position(|r| r.id() == hit.id()).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            for hit in hits {
                assert!(hit
                    .field("name")
                    .display_string()
                    .to_lowercase()
                    .contains(&search.to_lowercase()));
            }
        }
    }
}
