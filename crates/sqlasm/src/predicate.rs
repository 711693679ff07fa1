//! Predicate definitions and their registry.
//!
//! A [`Predicate`] is one comparison (`field op value`). Predicates live in a
//! [`PredicateRegistry`] under a [`PredicateId`]; the condition stream only
//! stores ids and asks the registry to render them.

use crate::dialect::Dialect;
use crate::error::{AsmError, AsmResult};
use crate::param::ParamList;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier of a registered predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateId(String);

impl PredicateId {
    /// Create an id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PredicateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PredicateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&PredicateId> for PredicateId {
    fn from(id: &PredicateId) -> Self {
        id.clone()
    }
}

/// Comparison operator together with its operand(s).
///
/// # Example
/// ```ignore
/// use sqlasm::Op;
///
/// Op::eq("active");
/// Op::gte(18);
/// Op::like("%admin%");
/// Op::is_null();
/// Op::in_list([1, 2, 3]);
/// Op::between(10, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Equal: column = value
    Eq(Value),
    /// Not equal: column != value
    Ne(Value),
    /// Greater than: column > value
    Gt(Value),
    /// Greater than or equal: column >= value
    Gte(Value),
    /// Less than: column < value
    Lt(Value),
    /// Less than or equal: column <= value
    Lte(Value),
    /// LIKE pattern match
    Like(Value),
    /// NOT LIKE pattern match
    NotLike(Value),
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
    /// IN (list)
    In(Vec<Value>),
    /// NOT IN (list)
    NotIn(Vec<Value>),
    /// BETWEEN a AND b
    Between(Value, Value),
    /// NOT BETWEEN a AND b
    NotBetween(Value, Value),
}

impl Op {
    /// Create an equality condition.
    pub fn eq(val: impl Into<Value>) -> Self {
        Op::Eq(val.into())
    }

    /// Create a not-equal condition.
    pub fn ne(val: impl Into<Value>) -> Self {
        Op::Ne(val.into())
    }

    /// Create a greater-than condition.
    pub fn gt(val: impl Into<Value>) -> Self {
        Op::Gt(val.into())
    }

    /// Create a greater-than-or-equal condition.
    pub fn gte(val: impl Into<Value>) -> Self {
        Op::Gte(val.into())
    }

    /// Create a less-than condition.
    pub fn lt(val: impl Into<Value>) -> Self {
        Op::Lt(val.into())
    }

    /// Create a less-than-or-equal condition.
    pub fn lte(val: impl Into<Value>) -> Self {
        Op::Lte(val.into())
    }

    /// Create a LIKE pattern match condition.
    pub fn like(val: impl Into<Value>) -> Self {
        Op::Like(val.into())
    }

    /// Create a NOT LIKE pattern match condition.
    pub fn not_like(val: impl Into<Value>) -> Self {
        Op::NotLike(val.into())
    }

    /// Create an IS NULL condition.
    pub fn is_null() -> Self {
        Op::IsNull
    }

    /// Create an IS NOT NULL condition.
    pub fn is_not_null() -> Self {
        Op::IsNotNull
    }

    /// Create an IN (list) condition.
    pub fn in_list<T: Into<Value>>(vals: impl IntoIterator<Item = T>) -> Self {
        Op::In(vals.into_iter().map(Into::into).collect())
    }

    /// Create a NOT IN (list) condition.
    pub fn not_in<T: Into<Value>>(vals: impl IntoIterator<Item = T>) -> Self {
        Op::NotIn(vals.into_iter().map(Into::into).collect())
    }

    /// Create a BETWEEN condition.
    pub fn between(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Op::Between(from.into(), to.into())
    }

    /// Create a NOT BETWEEN condition.
    pub fn not_between(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Op::NotBetween(from.into(), to.into())
    }

    fn symbol(&self) -> &'static str {
        match self {
            Op::Eq(_) => "=",
            Op::Ne(_) => "!=",
            Op::Gt(_) => ">",
            Op::Gte(_) => ">=",
            Op::Lt(_) => "<",
            Op::Lte(_) => "<=",
            Op::Like(_) => "LIKE",
            Op::NotLike(_) => "NOT LIKE",
            Op::IsNull => "IS NULL",
            Op::IsNotNull => "IS NOT NULL",
            Op::In(_) => "IN",
            Op::NotIn(_) => "NOT IN",
            Op::Between(..) => "BETWEEN",
            Op::NotBetween(..) => "NOT BETWEEN",
        }
    }
}

/// One atomic comparison usable in a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    op: Op,
}

impl Predicate {
    /// Create a predicate over `field`.
    pub fn new(field: impl Into<String>, op: Op) -> Self {
        Self {
            field: field.into(),
            op,
        }
    }

    /// The compared field, unquoted.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The operator and operand(s).
    pub fn op(&self) -> &Op {
        &self.op
    }

    /// Render this predicate, appending its values to `params`.
    pub fn render(&self, dialect: &dyn Dialect, params: &mut ParamList) -> String {
        let col = dialect.quote_identifier(&self.field);
        let op = self.op.symbol();
        match &self.op {
            Op::Eq(v)
            | Op::Ne(v)
            | Op::Gt(v)
            | Op::Gte(v)
            | Op::Lt(v)
            | Op::Lte(v)
            | Op::Like(v)
            | Op::NotLike(v) => {
                let mut sql = format!("{col} {op} ");
                params.bind(&mut sql, dialect, v);
                sql
            }
            Op::IsNull | Op::IsNotNull => format!("{col} {op}"),
            Op::In(vals) | Op::NotIn(vals) => {
                if vals.is_empty() {
                    // Empty IN list - always false / true
                    return if matches!(self.op, Op::In(_)) {
                        "1=0".to_string()
                    } else {
                        "1=1".to_string()
                    };
                }
                let mut sql = format!("{col} {op} (");
                for (i, v) in vals.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    params.bind(&mut sql, dialect, v);
                }
                sql.push(')');
                sql
            }
            Op::Between(from, to) | Op::NotBetween(from, to) => {
                let mut sql = format!("{col} {op} ");
                params.bind(&mut sql, dialect, from);
                sql.push_str(" AND ");
                params.bind(&mut sql, dialect, to);
                sql
            }
        }
    }
}

/// Named predicate definitions scoped to one builder.
#[derive(Debug, Clone, Default)]
pub struct PredicateRegistry {
    predicates: HashMap<PredicateId, Predicate>,
    next_auto: usize,
}

impl PredicateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) the predicate stored under `id`.
    pub fn define(
        &mut self,
        id: impl Into<PredicateId>,
        field: impl Into<String>,
        op: Op,
    ) -> PredicateId {
        let id = id.into();
        self.predicates.insert(id.clone(), Predicate::new(field, op));
        id
    }

    /// Define a predicate under a freshly generated id (`p0`, `p1`, ...),
    /// skipping ids that were defined by hand.
    pub fn define_auto(&mut self, field: impl Into<String>, op: Op) -> PredicateId {
        let id = loop {
            let candidate = PredicateId(format!("p{}", self.next_auto));
            self.next_auto += 1;
            if !self.predicates.contains_key(&candidate) {
                break candidate;
            }
        };
        self.define(id, field, op)
    }

    /// Look up a predicate.
    pub fn get(&self, id: &PredicateId) -> Option<&Predicate> {
        self.predicates.get(id)
    }

    /// Check whether `id` is defined.
    pub fn contains(&self, id: &PredicateId) -> bool {
        self.predicates.contains_key(id)
    }

    /// Number of defined predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Check if no predicate is defined.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Drop every definition.
    pub fn clear(&mut self) {
        self.predicates.clear();
        self.next_auto = 0;
    }

    /// Render the predicate stored under `id`, appending its values to
    /// `params`.
    pub fn render(
        &self,
        id: &PredicateId,
        dialect: &dyn Dialect,
        params: &mut ParamList,
    ) -> AsmResult<String> {
        let predicate = self
            .predicates
            .get(id)
            .ok_or_else(|| AsmError::UnresolvedPredicate(id.clone()))?;
        Ok(predicate.render(dialect, params))
    }
}
