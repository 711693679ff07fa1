//! ORDER BY state.

use serde::{Deserialize, Serialize};

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn to_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// ORDER BY entries in the order they were first added.
///
/// Re-ordering by a field that is already present changes its direction in
/// place; the field keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy {
    items: Vec<(String, SortDir)>,
}

impl OrderBy {
    /// Create a new empty OrderBy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a field.
    pub fn set(&mut self, field: impl Into<String>, dir: SortDir) {
        let field = field.into();
        match self.items.iter_mut().find(|(f, _)| *f == field) {
            Some((_, d)) => *d = dir,
            None => self.items.push((field, dir)),
        }
    }

    /// Check if this OrderBy is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in order.
    pub fn items(&self) -> &[(String, SortDir)] {
        &self.items
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append ` ORDER BY field dir, ...` to `sql`.
    ///
    /// Does nothing if the OrderBy is empty. Field text is written as given.
    pub fn append_to(&self, sql: &mut String) {
        if self.items.is_empty() {
            return;
        }
        sql.push_str(" ORDER BY ");
        for (i, (field, dir)) in self.items.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(field);
            sql.push(' ');
            sql.push_str(dir.to_sql());
        }
    }
}
