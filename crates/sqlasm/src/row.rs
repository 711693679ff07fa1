//! Ordered field/value rows for INSERT and UPDATE.

use crate::error::{AsmError, AsmResult};
use crate::value::Value;

/// An ordered association of field names to values.
///
/// Field order is insertion order and is what INSERT column lists and UPDATE
/// SET clauses follow. Setting a field that is already present replaces its
/// value without moving it.
///
/// # Example
/// ```ignore
/// use sqlasm::Row;
///
/// let row = Row::new().set("name", "alice").set("age", 30);
/// let row: Row = [("name", "bob")].into_iter().collect();
/// let row = Row::from_json(serde_json::json!({"name": "carol", "age": 41}))?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Set a field (consuming version of [`Row::insert`]).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set an optional field (None => skip).
    pub fn set_opt<T: Into<Value>>(self, field: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// Set a field, returning the value it replaced.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((field, value));
                None
            }
        }
    }

    /// Look up a field's value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.iter().find(|(f, _)| f == field).map(|(_, v)| v)
    }

    /// Field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(f, _)| f.as_str())
    }

    /// Field/value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a row from a JSON object, keeping its key order.
    pub fn from_json(json: serde_json::Value) -> AsmResult<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(AsmError::validation(format!(
                "row must be a JSON object, got {other}"
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl TryFrom<serde_json::Value> for Row {
    type Error = AsmError;

    fn try_from(json: serde_json::Value) -> AsmResult<Self> {
        Row::from_json(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let row = Row::new().set("b", 1).set("a", 2).set("c", 3);
        assert_eq!(row.fields().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut row = Row::new().set("a", 1).set("b", 2);
        assert_eq!(row.insert("a", 9), Some(Value::Int(1)));
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![("a", &Value::Int(9)), ("b", &Value::Int(2))]
        );
    }

    #[test]
    fn set_opt_skips_none() {
        let row = Row::new().set_opt("a", Some(1)).set_opt::<i32>("b", None);
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn from_json_preserves_key_order() {
        let row = Row::from_json(serde_json::json!({"name": "a", "age": 1})).unwrap();
        assert_eq!(row.fields().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(row.get("age"), Some(&Value::Int(1)));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        let err = Row::from_json(serde_json::json!([1, 2])).unwrap_err();
        assert!(err.is_validation());
    }
}
