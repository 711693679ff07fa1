//! Positional parameter storage.

use crate::dialect::Dialect;
use crate::value::Value;

/// Ordered list of bound values.
///
/// The i-th value belongs to the i-th placeholder marker of the SQL text it
/// was collected for. Values are only ever appended through [`ParamList::bind`]
/// (marker and value together) or [`ParamList::push`] (caller wrote the marker).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    params: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based index.
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.params.push(value.into());
        self.params.len()
    }

    /// Write `value` into `sql`: a generic marker plus one parameter, or the
    /// expression itself for [`Value::Raw`].
    pub fn bind(&mut self, sql: &mut String, dialect: &dyn Dialect, value: &Value) {
        match value {
            Value::Raw(expr) => sql.push_str(expr),
            _ => {
                sql.push_str(dialect.placeholder_marker());
                self.params.push(value.clone());
            }
        }
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Borrow the values in marker order.
    pub fn as_slice(&self) -> &[Value] {
        &self.params
    }

    /// Take the values out of the list.
    pub fn into_vec(self) -> Vec<Value> {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Ansi;

    #[test]
    fn bind_appends_marker_and_value() {
        let mut params = ParamList::new();
        let mut sql = String::from("a = ");
        params.bind(&mut sql, &Ansi, &Value::Int(1));
        assert_eq!(sql, "a = ?");
        assert_eq!(params.as_slice(), &[Value::Int(1)]);
    }

    #[test]
    fn bind_raw_writes_expression_only() {
        let mut params = ParamList::new();
        let mut sql = String::from("a = ");
        params.bind(&mut sql, &Ansi, &Value::raw("NOW()"));
        assert_eq!(sql, "a = NOW()");
        assert!(params.is_empty());
    }

    #[test]
    fn push_returns_one_based_index() {
        let mut params = ParamList::new();
        assert_eq!(params.push(10), 1);
        assert_eq!(params.push("x"), 2);
        assert_eq!(params.len(), 2);
    }
}
