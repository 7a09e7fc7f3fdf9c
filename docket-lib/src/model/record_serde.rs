//! Custom serialization for Record.
//!
//! Records travel as flat JSON objects:
//! - `"id"` is mandatory; strings are taken as-is, numbers are stringified
//! - every other key becomes a field, converted with `Value::from(serde_json::Value)`
//! - `"_readonly": true` marks the record read-only and is not stored as a field
//!
//! Serialization writes `id` first, then fields in key order so files stay
//! diff-friendly.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

const ID_KEY: &str = "id";
const READ_ONLY_KEY: &str = "_readonly";

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let extra = usize::from(self.read_only);
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1 + extra))?;
        map.serialize_entry(ID_KEY, &self.id)?;
        if self.read_only {
            map.serialize_entry(READ_ONLY_KEY, &true)?;
        }

        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();
        for key in keys {
            map.serialize_entry(key, &self.fields[key])?;
        }

        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with an \"id\" field")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new("");
        let mut id: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            match key.as_str() {
                ID_KEY => {
                    id = Some(match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Number(n) => n.to_string(),
                        other => {
                            return Err(M::Error::custom(format!(
                                "\"id\" must be a string or number, got {other}"
                            )));
                        }
                    });
                }
                READ_ONLY_KEY => record.read_only = value.as_bool().unwrap_or(false),
                _ => {
                    record.fields.insert(key, Value::from(value));
                }
            }
        }

        record.id = id.ok_or_else(|| M::Error::missing_field(ID_KEY))?;
        Ok(record)
    }
}
