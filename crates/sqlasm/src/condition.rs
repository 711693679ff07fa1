//! Condition stream: a flat token encoding of a WHERE expression.
//!
//! The stream is rendered strictly left to right, exactly as appended. It
//! does not check that groups are balanced or that operands and connectives
//! alternate; `begin_group` without `end_group` simply yields broken SQL.
//!
//! # Example
//! ```ignore
//! use sqlasm::{ConditionStream, Op, PredicateRegistry, ParamList, Postgres};
//!
//! let mut reg = PredicateRegistry::new();
//! let a = reg.define("a", "status", Op::eq("active"));
//! let b = reg.define("b", "age", Op::gte(18));
//! let c = reg.define("c", "role", Op::eq("admin"));
//!
//! let mut stream = ConditionStream::new();
//! stream.begin_group().add_predicate(a).and().add_predicate(b).end_group()
//!     .or().add_predicate(c);
//!
//! let mut params = ParamList::new();
//! let sql = stream.render(&reg, &Postgres, &mut params)?;
//! // ("status" = ? AND "age" >= ?) OR "role" = ?
//! ```

use crate::dialect::Dialect;
use crate::error::AsmResult;
use crate::param::ParamList;
use crate::placeholder;
use crate::predicate::{PredicateId, PredicateRegistry};
use crate::value::Value;

/// One structural element of a condition stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Reference to a predicate in the registry.
    Predicate(PredicateId),
    /// Caller-supplied SQL, with one value per generic marker it contains.
    ///
    /// # Safety
    /// The SQL text is emitted verbatim. Be careful with SQL injection.
    Raw { sql: String, values: Vec<Value> },
    /// `(`
    GroupOpen,
    /// `)`
    GroupClose,
    /// ` AND `
    And,
    /// ` OR `
    Or,
}

/// Ordered sequence of condition tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionStream {
    tokens: Vec<Token>,
}

impl ConditionStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append a raw token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append a predicate reference.
    pub fn add_predicate(&mut self, id: impl Into<PredicateId>) -> &mut Self {
        self.push(Token::Predicate(id.into()))
    }

    /// Append a raw SQL fragment without parameters.
    pub fn add_raw(&mut self, sql: impl Into<String>) -> &mut Self {
        self.push(Token::Raw {
            sql: sql.into(),
            values: Vec::new(),
        })
    }

    /// Append a raw SQL fragment using generic markers (`?`) for `values`.
    ///
    /// The marker count is checked when the stream is rendered.
    pub fn add_raw_bind<T: Into<Value>>(
        &mut self,
        sql: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        self.push(Token::Raw {
            sql: sql.into(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Append `(`.
    pub fn begin_group(&mut self) -> &mut Self {
        self.push(Token::GroupOpen)
    }

    /// Append `)`.
    pub fn end_group(&mut self) -> &mut Self {
        self.push(Token::GroupClose)
    }

    /// Append `AND`.
    pub fn and(&mut self) -> &mut Self {
        self.push(Token::And)
    }

    /// Append `OR`.
    pub fn or(&mut self) -> &mut Self {
        self.push(Token::Or)
    }

    /// Check if no token has been appended.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Borrow the tokens in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Remove every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Render the WHERE body (without the `WHERE` keyword), appending bound
    /// values to `params` in marker order.
    ///
    /// Fails on the first predicate id missing from `registry` and on raw
    /// fragments whose marker count does not match their values.
    pub fn render(
        &self,
        registry: &PredicateRegistry,
        dialect: &dyn Dialect,
        params: &mut ParamList,
    ) -> AsmResult<String> {
        let mut sql = String::new();
        for token in &self.tokens {
            match token {
                Token::Predicate(id) => sql.push_str(&registry.render(id, dialect, params)?),
                Token::Raw { sql: raw, values } => {
                    sql.push_str(&placeholder::bind_fragment(raw, values, dialect, params)?);
                }
                Token::GroupOpen => sql.push('('),
                Token::GroupClose => sql.push(')'),
                Token::And => sql.push_str(" AND "),
                Token::Or => sql.push_str(" OR "),
            }
        }
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Ansi;
    use crate::error::AsmError;
    use crate::predicate::Op;

    fn registry() -> PredicateRegistry {
        let mut reg = PredicateRegistry::new();
        reg.define("a", "status", Op::eq("active"));
        reg.define("b", "age", Op::gte(18));
        reg.define("c", "role", Op::eq("admin"));
        reg
    }

    #[test]
    fn renders_grouped_or() {
        let mut stream = ConditionStream::new();
        stream
            .begin_group()
            .add_predicate("a")
            .and()
            .add_predicate("b")
            .end_group()
            .or()
            .add_predicate("c");

        let mut params = ParamList::new();
        let sql = stream.render(&registry(), &Ansi, &mut params).unwrap();
        assert_eq!(sql, r#"("status" = ? AND "age" >= ?) OR "role" = ?"#);
        assert_eq!(
            params.into_vec(),
            vec![Value::from("active"), Value::Int(18), Value::from("admin")]
        );
    }

    #[test]
    fn keeps_append_order() {
        let mut stream = ConditionStream::new();
        stream.add_predicate("c").or().add_predicate("a");
        let mut params = ParamList::new();
        let sql = stream.render(&registry(), &Ansi, &mut params).unwrap();
        assert_eq!(sql, r#""role" = ? OR "status" = ?"#);
        assert_eq!(params.as_slice()[0], Value::from("admin"));
    }

    #[test]
    fn raw_fragments_carry_their_values() {
        let mut stream = ConditionStream::new();
        stream
            .add_predicate("a")
            .and()
            .add_raw_bind("score BETWEEN ? AND ?", [1, 9])
            .and()
            .add_raw("deleted_at IS NULL");
        let mut params = ParamList::new();
        let sql = stream.render(&registry(), &Ansi, &mut params).unwrap();
        assert_eq!(
            sql,
            r#""status" = ? AND score BETWEEN ? AND ? AND deleted_at IS NULL"#
        );
        assert_eq!(
            params.into_vec(),
            vec![Value::from("active"), Value::Int(1), Value::Int(9)]
        );
    }

    #[test]
    fn unresolved_predicate_fails() {
        let mut stream = ConditionStream::new();
        stream.add_predicate("a").and().add_predicate("zzz");
        let mut params = ParamList::new();
        let err = stream.render(&registry(), &Ansi, &mut params).unwrap_err();
        assert!(err.is_unresolved_predicate());
    }

    #[test]
    fn raw_marker_mismatch_fails() {
        let mut stream = ConditionStream::new();
        stream.add_raw_bind("a = ? OR b = ?", [1]);
        let mut params = ParamList::new();
        let err = stream.render(&registry(), &Ansi, &mut params).unwrap_err();
        assert_eq!(err, AsmError::placeholder_mismatch(2, 1));
    }

    #[test]
    fn unbalanced_groups_are_rendered_as_is() {
        let mut stream = ConditionStream::new();
        stream.begin_group().add_predicate("a");
        let mut params = ParamList::new();
        let sql = stream.render(&registry(), &Ansi, &mut params).unwrap();
        assert_eq!(sql, r#"("status" = ?"#);
    }
}
