//! Dynamic record and the row access trait

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Value;
use crate::error::FieldError;

/// A row that can be displayed, searched, sorted and edited by a table view.
///
/// This is the only dynamic surface the engine needs: typed entities keep
/// their own fields and hand out [`Value`]s by column key.
///
/// # Example
///
/// ```
/// use docket_lib::model::{TableRow, Value};
///
/// #[derive(Clone)]
/// struct Matter {
///     id: String,
///     title: String,
/// }
///
/// impl TableRow for Matter {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "title" => Value::from(self.title.as_str()),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Stable unique identifier of this row.
    fn id(&self) -> &str;

    /// Value of the given field, `Value::Null` when absent.
    fn field(&self, key: &str) -> Value;

    /// Read-only rows never enter edit mode.
    fn is_read_only(&self) -> bool {
        false
    }
}

/// A dynamic record keyed by field name.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any field. The typed getters back the conversions into the
/// practice entities.
///
/// # Example
///
/// ```
/// use docket_lib::model::Record;
///
/// let record = Record::new("1")
///     .set("name", "Alice")
///     .set("amount", 500i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Alice"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The unique identifier of the record.
    pub(crate) id: String,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,

    /// Rows flagged read-only by the data source.
    pub(crate) read_only: bool,
}

impl Record {
    /// Creates a new empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
            read_only: false,
        }
    }

    /// Returns the record ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Marks the record as read-only (builder pattern).
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or does not convert.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    fn typed<T>(
        &self,
        field: &str,
        expected: &'static str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<Option<T>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(&self.id, field)),
            Some(Value::Null) => Ok(None),
            Some(value) => convert(value).map(Some).ok_or_else(|| {
                FieldError::type_mismatch(&self.id, field, expected, value.type_name())
            }),
        }
    }

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(&self.id, field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                &self.id,
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a decimal field value. Integers, floats and numeric strings
    /// convert.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        self.typed(field, "decimal", |value| match value {
            Value::Decimal(d) => Some(*d),
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Float(f) => Decimal::try_from(*f).ok(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Gets a date field value. Timestamps keep their UTC date and strings
    /// are read as `YYYY-MM-DD`.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        self.typed(field, "date", |value| match value {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date_naive()),
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        })
    }
}

impl TableRow for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Value {
        if key == "id" {
            return Value::String(self.id.clone());
        }
        self.fields.get(key).cloned().unwrap_or_default()
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}
