//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde::Serializer;

use crate::error::ValidationError;

/// A dynamic value read out of a row for generic column handling.
///
/// Typed rows expose their fields through [`TableRow::field`](super::TableRow::field),
/// which converts into this closed set of variants. The filter stage works on
/// [`Value::display_string`], the sort stage on [`Value::sort_cmp`].
///
/// # Type Mapping
///
/// | JSON / Rust          | Variant    |
/// |----------------------|------------|
/// | null, missing field  | `Null`     |
/// | boolean              | `Bool`     |
/// | integer              | `Int`      |
/// | float                | `Float`    |
/// | money amounts        | `Decimal`  |
/// | string               | `String`   |
/// | calendar date        | `Date`     |
/// | timestamp            | `DateTime` |
/// | array, object        | `Json`     |
///
/// # Example
///
/// ```
/// use docket_lib::model::Value;
///
/// let name = Value::from("Alice");
/// let amount = Value::from(500i64);
/// assert_eq!(amount.display_string(), "500");
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Calendar date without a time.
    Date(NaiveDate),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Nested object or array.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for the numeric variants.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Json(_) => "json",
        }
    }

    /// String coercion used for searching and for text drafts.
    ///
    /// Null renders as the empty string, integral floats drop their
    /// fractional part, dates are ISO-8601 and JSON is compact.
    pub fn display_string(&self) -> String {
        self.to_string()
    }

    /// Total ordering used by the sort stage.
    ///
    /// Numbers compare numerically across `Int`, `Float` and `Decimal`, dates
    /// chronologically across `Date` and `DateTime`. Values of different
    /// kinds order by kind: number, string, bool, date, json, null.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Json(a), Value::Json(b)) => a.to_string().cmp(&b.to_string()),
            _ => {
                let (rank_a, rank_b) = (self.kind_rank(), other.kind_rank());
                if rank_a != rank_b {
                    return rank_a.cmp(&rank_b);
                }
                match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a.total_cmp(&b),
                    _ => self.as_datetime().cmp(&other.as_datetime()),
                }
            }
        }
    }

    /// Converts an edit draft into a value of the same kind as `original`.
    ///
    /// Numeric, boolean, date, timestamp and JSON originals require a
    /// parseable draft; an empty draft clears them to `Null`. Text and null
    /// originals take the draft as a string.
    pub fn parse_like(original: &Value, text: &str) -> Result<Value, ValidationError> {
        let trimmed = text.trim();
        let number_error = || ValidationError::Number {
            value: text.to_string(),
        };

        if trimmed.is_empty() && !matches!(original, Value::Null | Value::String(_)) {
            return Ok(Value::Null);
        }

        match original {
            Value::Int(_) => match trimmed.parse::<i64>() {
                Ok(n) => Ok(Value::Int(n)),
                Err(_) => trimmed
                    .parse::<f64>()
                    .map(Value::Float)
                    .map_err(|_| number_error()),
            },
            Value::Float(_) => trimmed
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| number_error()),
            Value::Decimal(_) => trimmed
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|_| number_error()),
            Value::Bool(_) => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(ValidationError::Bool {
                    value: text.to_string(),
                }),
            },
            Value::Date(_) => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| ValidationError::Date {
                    value: text.to_string(),
                }),
            Value::DateTime(_) => DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| Value::DateTime(dt.with_timezone(&Utc)))
                .map_err(|_| ValidationError::DateTime {
                    value: text.to_string(),
                }),
            Value::Json(_) => serde_json::from_str::<serde_json::Value>(trimmed)
                .map(Value::Json)
                .map_err(|_| ValidationError::Json {
                    value: text.to_string(),
                }),
            Value::Null | Value::String(_) => Ok(Value::String(text.to_string())),
        }
    }

    /// Converts into a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Decimal(d) => d
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(d.to_string())),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Date(_) | Value::DateTime(_) => serde_json::Value::String(self.to_string()),
            Value::Json(j) => j.clone(),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => 0,
            Value::String(_) => 1,
            Value::Bool(_) => 2,
            Value::Date(_) | Value::DateTime(_) => 3,
            Value::Json(_) => 4,
            Value::Null => 5,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d.and_time(NaiveTime::MIN).and_utc()),
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // f64's Display already omits ".0" on integral values
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(d) => write!(f, "{}", d.normalize()),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Value::Json(j) => write!(f, "{j}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
