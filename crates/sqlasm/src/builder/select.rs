use super::Builder;
use crate::dialect::Dialect;
use crate::error::AsmResult;
use crate::param::ParamList;
use crate::statement::{Statement, StatementKind};

/// One entry of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    expr: String,
    quote: bool,
}

impl Column {
    /// A column name quoted through the dialect.
    pub fn quoted(name: impl Into<String>) -> Self {
        Self {
            expr: name.into(),
            quote: true,
        }
    }

    /// An expression written verbatim.
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            quote: false,
        }
    }

    pub(crate) fn wildcard() -> Self {
        Self::raw("*")
    }

    pub(crate) fn is_wildcard(&self) -> bool {
        !self.quote && self.expr == "*"
    }

    /// Column text as written by the caller.
    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        if self.quote {
            dialect.quote_identifier(&self.expr)
        } else {
            self.expr.clone()
        }
    }
}

impl Builder {
    /// Render `SELECT cols FROM table [WHERE ...] [ORDER BY ...] [group]
    /// [LIMIT ?] [OFFSET ?]`.
    pub fn for_select(&self) -> AsmResult<Statement> {
        let dialect = self.dialect.as_ref();
        let mut params = ParamList::new();

        let cols: Vec<String> = self.columns.iter().map(|c| c.to_sql(dialect)).collect();
        let mut sql = format!("SELECT {} FROM {}", cols.join(", "), self.table_sql()?);

        self.push_where(&mut sql, &mut params)?;
        self.order.append_to(&mut sql);
        if let Some(group) = &self.group {
            sql.push(' ');
            sql.push_str(group);
        }
        self.push_pagination(&mut sql, &mut params)?;

        self.finish(StatementKind::Select, sql, params)
    }
}
