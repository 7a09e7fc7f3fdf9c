//! Column descriptors

use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;

/// How an editable column is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditType {
    /// Free text input.
    #[default]
    Text,
    /// Pick one of the column's options from a dropdown.
    Select,
    /// Drag or click a card onto one of the column's options. Never enters
    /// text editing.
    Status,
    /// Text input validated as an email address.
    Email,
    /// Text input validated as a phone number.
    Phone,
}

impl EditType {
    /// Returns `true` for types whose value must be one of the column options.
    pub fn has_options(self) -> bool {
        matches!(self, EditType::Select | EditType::Status)
    }
}

/// One enumerated choice of a `select` or `status` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOption {
    /// The stored value.
    pub value: String,
    /// The display label.
    pub label: String,
}

impl ColumnOption {
    /// Creates a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Static description of one visible field.
///
/// # Example
///
/// ```
/// use docket_lib::model::{Column, ColumnOption, EditType};
///
/// let columns = vec![
///     Column::new("name", "Name").sortable().editable(EditType::Text),
///     Column::new("status", "Status")
///         .editable(EditType::Status)
///         .with_options([
///             ColumnOption::new("open", "Open"),
///             ColumnOption::new("closed", "Closed"),
///         ]),
/// ];
/// assert_eq!(columns[1].option_label("open"), Some("Open"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Field name read through [`TableRow::field`](super::TableRow::field).
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    #[serde(default)]
    pub sortable: bool,
    /// Whether cells of this column can be edited.
    #[serde(default)]
    pub editable: bool,
    /// How the cell is edited.
    #[serde(default)]
    pub edit_type: EditType,
    /// Choices for `select` and `status` columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ColumnOption>,
}

impl Column {
    /// Creates a read-only, unsortable text column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            editable: false,
            edit_type: EditType::Text,
            options: Vec::new(),
        }
    }

    /// Makes the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Makes the column editable with the given edit type.
    pub fn editable(mut self, edit_type: EditType) -> Self {
        self.editable = true;
        self.edit_type = edit_type;
        self
    }

    /// Sets the options of a `select` or `status` column.
    pub fn with_options(mut self, options: impl IntoIterator<Item = ColumnOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Returns the option with the given value.
    pub fn option(&self, value: &str) -> Option<&ColumnOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Returns the label of the option with the given value.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.option(value).map(|o| o.label.as_str())
    }

    /// Checks a draft against this column's edit type.
    pub fn validate(&self, draft: &str) -> Result<(), ValidationError> {
        match self.edit_type {
            EditType::Text => Ok(()),
            EditType::Email => {
                if draft.is_empty() || email_address::EmailAddress::is_valid(draft) {
                    Ok(())
                } else {
                    Err(ValidationError::Email {
                        value: draft.to_string(),
                    })
                }
            }
            EditType::Phone => {
                if draft.is_empty() || is_phone_number(draft) {
                    Ok(())
                } else {
                    Err(ValidationError::Phone {
                        value: draft.to_string(),
                    })
                }
            }
            EditType::Select | EditType::Status => {
                if self.option(draft).is_some() {
                    Ok(())
                } else {
                    Err(ValidationError::UnknownOption {
                        column: self.key.clone(),
                        value: draft.to_string(),
                    })
                }
            }
        }
    }
}

/// At least seven digits, separated only by spaces and `+ - ( ) .`.
fn is_phone_number(s: &str) -> bool {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.');
    s.chars().all(allowed) && s.chars().filter(char::is_ascii_digit).count() >= 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_column() -> Column {
        Column::new("status", "Status")
            .editable(EditType::Status)
            .with_options([
                ColumnOption::new("open", "Open"),
                ColumnOption::new("closed", "Closed"),
            ])
    }

    #[test]
    fn test_builder() {
        let column = Column::new("name", "Name").sortable().editable(EditType::Email);
        assert!(column.sortable);
        assert!(column.editable);
        assert_eq!(column.edit_type, EditType::Email);
    }

    #[test]
    fn test_validate_email() {
        let column = Column::new("email", "Email").editable(EditType::Email);
        assert!(column.validate("alice@example.com").is_ok());
        assert!(column.validate("").is_ok());
        assert!(matches!(
            column.validate("not-an-email"),
            Err(ValidationError::Email { .. })
        ));
    }

    #[test]
    fn test_validate_phone() {
        let column = Column::new("phone", "Phone").editable(EditType::Phone);
        assert!(column.validate("+44 (0)113 496-0000").is_ok());
        assert!(column.validate("12345").is_err());
        assert!(column.validate("555-CALL-NOW").is_err());
    }

    #[test]
    fn test_validate_options() {
        let column = status_column();
        assert!(column.validate("closed").is_ok());
        assert_eq!(
            column.validate("archived"),
            Err(ValidationError::UnknownOption {
                column: "status".into(),
                value: "archived".into(),
            })
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"key": "status", "label": "Status", "editable": true,
            "edit_type": "select", "options": [{"value": "open", "label": "Open"}]}"#;
        let column: Column = serde_json::from_str(json).unwrap();
        assert_eq!(column.edit_type, EditType::Select);
        assert!(!column.sortable);
        assert_eq!(column.option_label("open"), Some("Open"));
    }
}
