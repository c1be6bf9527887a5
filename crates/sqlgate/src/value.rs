//! Values, rows and row sets exchanged with the driver.
//!
//! A [`Row`] keeps its columns in insertion order: the order in which columns
//! are written is the order in which INSERT/UPDATE placeholders are numbered
//! and parameters are bound.

use crate::error::{DbError, DbResult};
use serde_json::Value as JsonValue;
use std::fmt;

/// A single SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Borrow the text payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer payload, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this is `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce to an integer the way loosely typed option maps expect
    /// (`10`, `10.0`, `"10"` all yield `10`).
    pub fn coerce_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) => Some(*f as i64),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            JsonValue::String(s) => Value::Text(s),
            // Nested structures are stored as their JSON text.
            other => Value::Text(other.to_string()),
        }
    }
}

/// An ordered column → value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column (builder form). Re-setting a column replaces its value in place.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column value, keeping the original position if it already exists.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Look up a column value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(c, _)| c.as_str())
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.columns.iter().map(|(_, v)| v)
    }

    /// Iterate `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Build a row from a JSON object, keeping key order.
    pub fn from_json_object(map: serde_json::Map<String, JsonValue>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Row {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

/// Input for a gateway insert: one row or several.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSet {
    One(Row),
    Many(Vec<Row>),
}

impl RowSet {
    /// Interpret JSON input the way loosely typed callers pass rows.
    ///
    /// - an object is a single row, unless its `"0"` entry is itself an object,
    ///   in which case every entry is a row;
    /// - an array whose first element is an object is a list of rows.
    pub fn from_json(input: JsonValue) -> DbResult<Self> {
        match input {
            JsonValue::Object(map) => {
                if matches!(map.get("0"), Some(JsonValue::Object(_))) {
                    map.into_iter()
                        .map(|(_, v)| json_row(v))
                        .collect::<DbResult<Vec<_>>>()
                        .map(RowSet::Many)
                } else {
                    Ok(RowSet::One(Row::from_json_object(map)))
                }
            }
            JsonValue::Array(items) => {
                if !matches!(items.first(), Some(JsonValue::Object(_))) {
                    return Err(DbError::validation(
                        "row set array must start with an object",
                    ));
                }
                items
                    .into_iter()
                    .map(json_row)
                    .collect::<DbResult<Vec<_>>>()
                    .map(RowSet::Many)
            }
            other => Err(DbError::validation(format!(
                "expected a row object or an array of rows, got {other}"
            ))),
        }
    }

    /// Flatten into the list of rows to write.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            RowSet::One(row) => vec![row],
            RowSet::Many(rows) => rows,
        }
    }
}

fn json_row(value: JsonValue) -> DbResult<Row> {
    match value {
        JsonValue::Object(map) => Ok(Row::from_json_object(map)),
        other => Err(DbError::validation(format!(
            "every row must be an object, got {other}"
        ))),
    }
}

impl From<Row> for RowSet {
    fn from(row: Row) -> Self {
        RowSet::One(row)
    }
}

impl From<Vec<Row>> for RowSet {
    fn from(rows: Vec<Row>) -> Self {
        RowSet::Many(rows)
    }
}
