//! Statement builder.
//!
//! A [`Builder`] holds a table name, a condition stream with its predicate
//! registry, ORDER BY/LIMIT/OFFSET state and output options. The four
//! generators ([`Builder::for_select`], [`Builder::for_delete`],
//! [`Builder::for_insert`], [`Builder::for_update`]) read that state and
//! return a fresh [`Statement`] every time; rendering never mutates the
//! builder.
//!
//! ## Output pipeline
//!
//! - Generators always write the generic `?` marker.
//! - The marker count is checked against the collected parameters.
//! - With inlining on, markers are replaced by literals; otherwise, with
//!   renumbering on, markers become the dialect's final form (`$1`, `$2`, ...
//!   for Postgres).
//!
//! # Example
//! ```ignore
//! use sqlasm::{Builder, Postgres};
//!
//! let mut b = Builder::new(Postgres);
//! b.table("users").eq("status", "active").and().gte("age", 18).limit(10);
//! let stmt = b.for_select()?;
//! assert_eq!(
//!     stmt.sql(),
//!     r#"SELECT * FROM "users" WHERE "status" = $1 AND "age" >= $2 LIMIT $3"#
//! );
//! ```

mod delete;
mod insert;
mod order;
mod pagination;
mod select;
mod update;

pub use order::{OrderBy, SortDir};
pub use pagination::Pagination;
pub use select::Column;

use crate::condition::ConditionStream;
use crate::config::RenderOptions;
use crate::dialect::Dialect;
use crate::error::{AsmError, AsmResult};
use crate::param::ParamList;
use crate::placeholder;
use crate::predicate::{Op, PredicateId, PredicateRegistry};
use crate::statement::{Statement, StatementKind};
use crate::trace;
use crate::value::Value;
use std::sync::Arc;

/// Accumulates statement state and renders SELECT, DELETE, INSERT and UPDATE.
#[derive(Debug, Clone)]
pub struct Builder {
    dialect: Arc<dyn Dialect>,
    table: String,
    columns: Vec<Column>,
    conditions: ConditionStream,
    predicates: PredicateRegistry,
    order: OrderBy,
    group: Option<String>,
    pagination: Pagination,
    options: RenderOptions,
}

impl Builder {
    /// Create a builder for `dialect`.
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self::with_dialect(Arc::new(dialect))
    }

    /// Create a builder sharing an existing dialect handle.
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            dialect,
            table: String::new(),
            columns: vec![Column::wildcard()],
            conditions: ConditionStream::new(),
            predicates: PredicateRegistry::new(),
            order: OrderBy::new(),
            group: None,
            pagination: Pagination::new(),
            options: RenderOptions::default(),
        }
    }

    /// The dialect this builder renders for.
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Clear all statement state. The dialect and render options are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.table.clear();
        self.columns = vec![Column::wildcard()];
        self.conditions.clear();
        self.predicates.clear();
        self.order.clear();
        self.group = None;
        self.pagination = Pagination::new();
        self
    }

    /// Set the target table. Dotted names are quoted per segment.
    pub fn table(&mut self, name: impl Into<String>) -> &mut Self {
        self.table = name.into();
        self
    }

    // ==================== Columns ====================

    /// Replace the SELECT list with quoted columns.
    pub fn select<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = cols.into_iter().map(Column::quoted).collect();
        if self.columns.is_empty() {
            self.columns.push(Column::wildcard());
        }
        self
    }

    /// Append one quoted column.
    pub fn add_column(&mut self, col: impl Into<String>) -> &mut Self {
        self.push_column(Column::quoted(col))
    }

    /// Append one column expression written verbatim (`COUNT(*)`, `a + b`).
    ///
    /// The expression cannot bind values. A bare `?` outside quotes is
    /// counted as a placeholder marker, so an operator such as Postgres'
    /// jsonb `?` makes rendering fail with
    /// [`AsmError::PlaceholderMismatch`]; use the function form
    /// (`jsonb_exists(data, 'k')`) instead.
    pub fn add_raw_column(&mut self, expr: impl Into<String>) -> &mut Self {
        self.push_column(Column::raw(expr))
    }

    fn push_column(&mut self, col: Column) -> &mut Self {
        if self.columns.len() == 1 && self.columns[0].is_wildcard() {
            self.columns[0] = col;
        } else {
            self.columns.push(col);
        }
        self
    }

    /// Current SELECT list.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    // ==================== Ordering / grouping / paging ====================

    /// Order by `field`. Ordering by a field already present updates its
    /// direction in place.
    pub fn order_by(&mut self, field: impl Into<String>, dir: SortDir) -> &mut Self {
        self.order.set(field, dir);
        self
    }

    /// Shorthand for `order_by(field, SortDir::Asc)`.
    pub fn asc(&mut self, field: impl Into<String>) -> &mut Self {
        self.order_by(field, SortDir::Asc)
    }

    /// Shorthand for `order_by(field, SortDir::Desc)`.
    pub fn desc(&mut self, field: impl Into<String>) -> &mut Self {
        self.order_by(field, SortDir::Desc)
    }

    /// Free-text grouping fragment (e.g. `GROUP BY status`), written after
    /// ORDER BY exactly as given.
    ///
    /// Like [`Builder::add_raw_column`], the fragment cannot bind values and
    /// must not contain an unquoted `?`.
    pub fn group(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.group = Some(fragment.into());
        self
    }

    /// Set LIMIT. Negative values fail at render time.
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.pagination.limit = Some(limit);
        self
    }

    /// Set OFFSET. Negative values fail at render time.
    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.pagination.offset = Some(offset);
        self
    }

    /// Set LIMIT/OFFSET from a 1-based page number.
    pub fn page(&mut self, page: i64, per_page: i64) -> AsmResult<&mut Self> {
        self.pagination = Pagination::page(page, per_page)?;
        Ok(self)
    }

    /// Drop LIMIT and OFFSET.
    pub fn clear_pagination(&mut self) -> &mut Self {
        self.pagination = Pagination::new();
        self
    }

    // ==================== Output options ====================

    /// Replace the render options.
    pub fn options(&mut self, options: RenderOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Turn marker renumbering on or off.
    pub fn renumber(&mut self, on: bool) -> &mut Self {
        self.options.renumber = on;
        self
    }

    /// Turn literal inlining on or off.
    pub fn inline_params(&mut self, on: bool) -> &mut Self {
        self.options.inline_params = on;
        self
    }

    /// Current render options.
    pub fn render_options(&self) -> RenderOptions {
        self.options
    }

    // ==================== Conditions ====================

    /// Define (or redefine) a named predicate without appending it.
    pub fn define(
        &mut self,
        id: impl Into<PredicateId>,
        field: impl Into<String>,
        op: Op,
    ) -> PredicateId {
        self.predicates.define(id, field, op)
    }

    /// Append a reference to a predicate defined with [`Builder::define`].
    ///
    /// The id is resolved at render time; an undefined id fails rendering.
    pub fn predicate(&mut self, id: impl Into<PredicateId>) -> &mut Self {
        self.conditions.add_predicate(id);
        self
    }

    /// Define an anonymous predicate and append it.
    pub fn filter(&mut self, field: impl Into<String>, op: Op) -> &mut Self {
        let id = self.predicates.define_auto(field, op);
        self.conditions.add_predicate(id);
        self
    }

    /// `field = value`
    pub fn eq(&mut self, field: impl Into<String>, val: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::eq(val))
    }

    /// `field != value`
    pub fn ne(&mut self, field: impl Into<String>, val: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::ne(val))
    }

    /// `field > value`
    pub fn gt(&mut self, field: impl Into<String>, val: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::gt(val))
    }

    /// `field >= value`
    pub fn gte(&mut self, field: impl Into<String>, val: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::gte(val))
    }

    /// `field < value`
    pub fn lt(&mut self, field: impl Into<String>, val: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::lt(val))
    }

    /// `field <= value`
    pub fn lte(&mut self, field: impl Into<String>, val: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::lte(val))
    }

    /// `field LIKE pattern`
    pub fn like(&mut self, field: impl Into<String>, pattern: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::like(pattern))
    }

    /// `field NOT LIKE pattern`
    pub fn not_like(&mut self, field: impl Into<String>, pattern: impl Into<Value>) -> &mut Self {
        self.filter(field, Op::not_like(pattern))
    }

    /// `field IS NULL`
    pub fn is_null(&mut self, field: impl Into<String>) -> &mut Self {
        self.filter(field, Op::is_null())
    }

    /// `field IS NOT NULL`
    pub fn is_not_null(&mut self, field: impl Into<String>) -> &mut Self {
        self.filter(field, Op::is_not_null())
    }

    /// `field IN (...)`. An empty list renders as `1=0`.
    pub fn in_list<T: Into<Value>>(
        &mut self,
        field: impl Into<String>,
        vals: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        self.filter(field, Op::in_list(vals))
    }

    /// `field NOT IN (...)`. An empty list renders as `1=1`.
    pub fn not_in<T: Into<Value>>(
        &mut self,
        field: impl Into<String>,
        vals: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        self.filter(field, Op::not_in(vals))
    }

    /// `field BETWEEN from AND to`
    pub fn between(
        &mut self,
        field: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> &mut Self {
        self.filter(field, Op::between(from, to))
    }

    /// `field NOT BETWEEN from AND to`
    pub fn not_between(
        &mut self,
        field: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> &mut Self {
        self.filter(field, Op::not_between(from, to))
    }

    /// Append a raw SQL fragment with no bound values.
    pub fn raw(&mut self, sql: impl Into<String>) -> &mut Self {
        self.conditions.add_raw(sql);
        self
    }

    /// Append a raw SQL fragment using `?` markers, one value per marker.
    ///
    /// A marker/value count mismatch fails rendering.
    pub fn raw_bind<T: Into<Value>>(
        &mut self,
        sql: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        self.conditions.add_raw_bind(sql, values);
        self
    }

    /// Append ` AND `.
    pub fn and(&mut self) -> &mut Self {
        self.conditions.and();
        self
    }

    /// Append ` OR `.
    pub fn or(&mut self) -> &mut Self {
        self.conditions.or();
        self
    }

    /// Append `(`. Balance is not checked.
    pub fn begin_group(&mut self) -> &mut Self {
        self.conditions.begin_group();
        self
    }

    /// Append `)`.
    pub fn end_group(&mut self) -> &mut Self {
        self.conditions.end_group();
        self
    }

    /// Append `(`, run `f`, then append `)`.
    ///
    /// ```ignore
    /// b.grouped(|b| b.eq("status", "active").and().gte("age", 18))
    ///     .or()
    ///     .eq("role", "admin");
    /// // ("status" = ? AND "age" >= ?) OR "role" = ?
    /// ```
    pub fn grouped<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.begin_group();
        f(self);
        self.end_group()
    }

    /// Condition tokens appended so far.
    pub fn conditions(&self) -> &ConditionStream {
        &self.conditions
    }

    /// Predicates defined so far.
    pub fn predicates(&self) -> &PredicateRegistry {
        &self.predicates
    }

    // ==================== Shared rendering ====================

    fn table_sql(&self) -> AsmResult<String> {
        if self.table.is_empty() {
            return Err(AsmError::validation("table name is not set"));
        }
        Ok(self.dialect.quote_identifier(&self.table))
    }

    /// Append ` WHERE <conditions>` when the stream is non-empty.
    fn push_where(&self, sql: &mut String, params: &mut ParamList) -> AsmResult<()> {
        if self.conditions.is_empty() {
            return Ok(());
        }
        let body = self
            .conditions
            .render(&self.predicates, self.dialect.as_ref(), params)?;
        sql.push_str(" WHERE ");
        sql.push_str(&body);
        Ok(())
    }

    fn push_pagination(&self, sql: &mut String, params: &mut ParamList) -> AsmResult<()> {
        self.pagination
            .append_to(sql, self.dialect.as_ref(), params)
    }

    /// Check markers against parameters and apply the output options.
    fn finish(&self, kind: StatementKind, sql: String, params: ParamList) -> AsmResult<Statement> {
        let dialect = self.dialect.as_ref();
        let params = params.into_vec();

        let markers = placeholder::count_markers(&sql, dialect);
        if markers != params.len() {
            return Err(AsmError::placeholder_mismatch(markers, params.len()));
        }

        let stmt = if self.options.inline_params {
            let sql = placeholder::inline(&sql, &params, dialect)?;
            Statement::new(kind, sql, params, true)
        } else if self.options.renumber {
            let sql = placeholder::renumber(&sql, dialect);
            Statement::new(kind, sql, params, false)
        } else {
            Statement::new(kind, sql, params, false)
        };

        trace::rendered(dialect.name(), &stmt);
        Ok(stmt)
    }
}
