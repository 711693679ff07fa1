use super::Builder;
use crate::error::{AsmError, AsmResult};
use crate::param::ParamList;
use crate::row::Row;
use crate::statement::{Statement, StatementKind};

impl Builder {
    /// Render `UPDATE table SET "f"=?, ... [WHERE ...] [LIMIT ?] [OFFSET ?]`.
    ///
    /// SET values are bound before WHERE values, matching marker order.
    pub fn for_update(&self, assignments: &Row) -> AsmResult<Statement> {
        if assignments.is_empty() {
            return Err(AsmError::validation(
                "UPDATE requires at least one assignment",
            ));
        }

        let dialect = self.dialect.as_ref();
        let mut params = ParamList::new();
        let mut sql = format!("UPDATE {} SET ", self.table_sql()?);

        for (i, (field, value)) in assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&dialect.quote_identifier(field));
            sql.push('=');
            params.bind(&mut sql, dialect, value);
        }

        self.push_where(&mut sql, &mut params)?;
        self.push_pagination(&mut sql, &mut params)?;

        self.finish(StatementKind::Update, sql, params)
    }
}
