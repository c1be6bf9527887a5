//! Ordered parameter lists handed to the driver.

use crate::value::Value;

/// One bound parameter. Named-colon drivers bind by `name`; positional
/// drivers use the list order and ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub value: Value,
}

impl Param {
    /// Create a positional parameter.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    /// Create a named parameter (`name` without the leading `:`).
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }
}

/// A collection of parameters in final bind order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a positional parameter and return its 1-based index.
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.params.push(Param::new(value));
        self.params.len()
    }

    /// Add a named parameter and return its 1-based index.
    pub fn push_named(&mut self, name: impl Into<String>, value: impl Into<Value>) -> usize {
        self.params.push(Param::named(name, value));
        self.params.len()
    }

    /// Add a pre-built Param and return its 1-based index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate parameters in bind order.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    /// Values in bind order.
    pub fn values(&self) -> Vec<&Value> {
        self.params.iter().map(|p| &p.value).collect()
    }

    /// Look up a named parameter.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .map(|p| &p.value)
    }

    /// Append another list's parameters after this list's.
    pub fn extend(&mut self, other: &ParamList) {
        self.params.extend(other.params.iter().cloned());
    }

    /// Clear all parameters.
    pub fn clear(&mut self) {
        self.params.clear();
    }
}

impl<V: Into<Value>> FromIterator<V> for ParamList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(Param::new).collect(),
        }
    }
}

impl<V: Into<Value>> From<Vec<V>> for ParamList {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl IntoIterator for ParamList {
    type Item = Param;
    type IntoIter = std::vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_one_based_index() {
        let mut params = ParamList::new();
        assert_eq!(params.push(1), 1);
        assert_eq!(params.push_named("name", "Ann"), 2);
        assert_eq!(params.get_named("name"), Some(&Value::from("Ann")));
    }

    #[test]
    fn extend_appends_in_order() {
        let mut params: ParamList = vec![31].into();
        params.extend(&ParamList::from(vec![30]));
        assert_eq!(params.values(), vec![&Value::Int(31), &Value::Int(30)]);
    }
}
