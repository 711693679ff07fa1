//! Rendered statements.

use crate::value::Value;
use std::fmt;

/// The kind of statement a generator produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// SELECT query
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
}

impl StatementKind {
    /// Leading SQL keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL text plus its positional parameters.
///
/// When the statement was rendered with inlining enabled the parameters are
/// already part of [`Statement::sql`]; they are still kept here for logging
/// and inspection.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Statement {
    kind: StatementKind,
    sql: String,
    params: Vec<Value>,
    inlined: bool,
}

impl Statement {
    pub(crate) fn new(kind: StatementKind, sql: String, params: Vec<Value>, inlined: bool) -> Self {
        Self {
            kind,
            sql,
            params,
            inlined,
        }
    }

    /// Statement kind.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in marker order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Whether the parameters were substituted into the SQL text.
    pub fn is_inlined(&self) -> bool {
        self.inlined
    }

    /// Split into SQL text and parameters.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
