//! Options accepted by [`Table::select`](super::Table::select).

use crate::error::{DbError, DbResult};
use crate::qb::OrderDirection;
use crate::value::Value;
use serde::{Deserialize, Deserializer};

/// LIMIT / OFFSET / ORDER BY for a gateway select.
///
/// Deserializes from loosely typed input: `{"limit": "10", "offset": 5.0,
/// "order": "name DESC"}` is accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    #[serde(deserialize_with = "lenient_int")]
    pub limit: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub offset: Option<i64>,
    pub order: Option<OrderSpec>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order(mut self, order: impl Into<OrderSpec>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Parse options from a JSON value.
    pub fn from_json(value: serde_json::Value) -> DbResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| DbError::validation(format!("invalid select options: {e}")))
    }

    /// LIMIT as an unsigned count; negative values are rejected.
    pub fn checked_limit(&self) -> DbResult<Option<u64>> {
        non_negative("limit", self.limit)
    }

    /// OFFSET as an unsigned count; negative values are rejected.
    pub fn checked_offset(&self) -> DbResult<Option<u64>> {
        non_negative("offset", self.offset)
    }
}

fn non_negative(name: &str, value: Option<i64>) -> DbResult<Option<u64>> {
    value
        .map(|n| {
            u64::try_from(n)
                .map_err(|_| DbError::validation(format!("{name} must not be negative, got {n}")))
        })
        .transpose()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<LenientInt>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => {
            let value = match raw {
                LenientInt::Int(n) => Value::Int(n),
                LenientInt::Float(f) => Value::Float(f),
                LenientInt::Text(s) => Value::Text(s),
            };
            value
                .coerce_i64()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected an integer, got {value:?}")))
        }
    }
}

/// How the caller spelled ORDER BY.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrderSpec {
    /// `"name"`, `"last_name, first_name DESC"`, `"RAND()"`
    Text(String),
    /// `["last_name", "first_name", "DESC"]`
    List(Vec<String>),
}

impl From<&str> for OrderSpec {
    fn from(s: &str) -> Self {
        OrderSpec::Text(s.to_string())
    }
}

impl From<String> for OrderSpec {
    fn from(s: String) -> Self {
        OrderSpec::Text(s)
    }
}

impl From<Vec<String>> for OrderSpec {
    fn from(v: Vec<String>) -> Self {
        OrderSpec::List(v)
    }
}

impl From<Vec<&str>> for OrderSpec {
    fn from(v: Vec<&str>) -> Self {
        OrderSpec::List(v.into_iter().map(String::from).collect())
    }
}

/// An ORDER BY split into columns and a direction keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub by: Vec<String>,
    /// The raw direction keyword (`ASC` when none was given).
    pub direction: String,
}

impl Order {
    /// Split `spec` into columns and a direction keyword.
    ///
    /// Columns are separated by commas or whitespace. Direction keywords
    /// (`ASC`, `DESC`, `RAND()`, ...) are removed wherever they appear; the
    /// last one found applies to every column.
    pub fn resolve(spec: &OrderSpec) -> Self {
        let pieces: Vec<&str> = match spec {
            OrderSpec::Text(text) => vec![text.as_str()],
            OrderSpec::List(items) => items.iter().map(String::as_str).collect(),
        };

        let mut by = Vec::new();
        let mut direction = None;
        for token in pieces
            .into_iter()
            .flat_map(|p| p.split(|c: char| c == ',' || c.is_whitespace()))
            .filter(|t| !t.is_empty())
        {
            if OrderDirection::is_keyword(token) {
                direction = Some(token.to_ascii_uppercase());
            } else {
                by.push(token.to_string());
            }
        }

        Self {
            by,
            direction: direction.unwrap_or_else(|| "ASC".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_text_with_direction() {
        let order = Order::resolve(&"name DESC".into());
        assert_eq!(order.by, vec!["name"]);
        assert_eq!(order.direction, "DESC");
    }

    #[test]
    fn resolve_text_defaults_to_asc() {
        let order = Order::resolve(&"last_name, first_name".into());
        assert_eq!(order.by, vec!["last_name", "first_name"]);
        assert_eq!(order.direction, "ASC");
    }

    #[test]
    fn resolve_list_and_random() {
        let order = Order::resolve(&vec!["last_name", "first_name", "desc"].into());
        assert_eq!(order.by, vec!["last_name", "first_name"]);
        assert_eq!(order.direction, "DESC");

        let order = Order::resolve(&"RAND()".into());
        assert!(order.by.is_empty());
        assert_eq!(order.direction, "RAND()");
    }

    #[test]
    fn resolve_direction_written_mid_string() {
        let order = Order::resolve(&"name DESC, id".into());
        assert_eq!(order.by, vec!["name", "id"]);
        assert_eq!(order.direction, "DESC");

        let order = Order::resolve(&vec!["name DESC", "id asc"].into());
        assert_eq!(order.by, vec!["name", "id"]);
        assert_eq!(order.direction, "ASC");

        let order = Order::resolve(&"name RANDOM".into());
        assert_eq!(order.by, vec!["name"]);
        assert_eq!(order.direction, "RANDOM");

        let order = Order::resolve(&"last_name,first_name DESC".into());
        assert_eq!(order.by, vec!["last_name", "first_name"]);
    }

    #[test]
    fn options_from_loose_json() {
        let opts = SelectOptions::from_json(json!({
            "limit": "10",
            "offset": 5.0,
            "order": ["name", "DESC"],
        }))
        .unwrap();
        assert_eq!(opts.limit, Some(10));
        assert_eq!(opts.offset, Some(5));
        assert_eq!(opts.order, Some(OrderSpec::List(vec!["name".into(), "DESC".into()])));

        let opts = SelectOptions::from_json(json!({"limit": " 7 ", "offset": null})).unwrap();
        assert_eq!(opts.limit, Some(7));
        assert_eq!(opts.offset, None);

        let opts = SelectOptions::from_json(json!({})).unwrap();
        assert_eq!(opts, SelectOptions::default());
    }

    #[test]
    fn options_reject_garbage() {
        let err = SelectOptions::from_json(json!({"limit": "ten"})).unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[test]
    fn negative_paging_is_rejected() {
        let opts = SelectOptions::new().limit(-1).offset(3);
        assert!(opts.checked_limit().is_err());
        assert_eq!(opts.checked_offset().unwrap(), Some(3));
    }
}
