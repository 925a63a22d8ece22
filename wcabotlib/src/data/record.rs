//! Dynamically shaped query rows.
//!
//! Column sets vary per query, so a row is an ordered list of
//! `(column, CellValue)` pairs rather than a fixed struct. Order is the
//! order the query engine reported the columns in, and it survives a JSON
//! round trip.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key carried by the one-record result set that signals an execution failure.
pub const ERROR_KEY: &str = "error";

/// Human-readable detail of an execution failure.
pub const MESSAGE_KEY: &str = "message";

/// A single cell value: the closed set of shapes the renderer understands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    /// Integer column (times in centiseconds, counts, ranks, ...)
    Integer(i64),
    /// Text column, or any value already formatted for display
    Text(String),
    /// SQL NULL
    #[default]
    Null,
}

impl CellValue {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Integer payload, if this is an integer cell
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Convert a JSON value into a cell.
    ///
    /// Integers and strings map directly; anything else that is not null
    /// (floats, booleans, nested values) is kept as its JSON text.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::String(s) => CellValue::Text(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Text(n.to_string()),
            },
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Null => f.write_str("NULL"),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Integer(v) => serializer.serialize_i64(*v),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(CellValue::from_json)
    }
}

/// One row of a result set, keyed by column name in engine order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

/// The ordered rows returned by one query execution.
pub type ResultSet = Vec<Record>;

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// The single record that stands in for a failed execution.
    pub fn error(message: impl Into<String>) -> Self {
        Record::new()
            .with(ERROR_KEY, "Execution failed")
            .with(MESSAGE_KEY, CellValue::Text(message.into()))
    }

    /// Builder: append (or replace) a column
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a column. Replacing an existing column keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a column
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check whether the column is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Column names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// `(column, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether this record is an execution-failure sentinel
    pub fn is_error(&self) -> bool {
        self.contains_key(ERROR_KEY)
    }

    /// Cell text as rendered in a table. A missing column renders as "".
    pub fn display_value(&self, key: &str) -> String {
        self.get(key).map(|v| v.to_string()).unwrap_or_default()
    }
}

impl IntoIterator for Record {
    type Item = (String, CellValue);
    type IntoIter = std::vec::IntoIter<(String, CellValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object of column values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
            record.insert(key, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
