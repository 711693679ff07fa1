use super::Builder;
use crate::error::AsmResult;
use crate::param::ParamList;
use crate::statement::{Statement, StatementKind};

impl Builder {
    /// Render `DELETE FROM table [WHERE ...] [LIMIT ?] [OFFSET ?]`.
    ///
    /// An empty condition stream deletes every row; nothing guards against it.
    pub fn for_delete(&self) -> AsmResult<Statement> {
        let mut params = ParamList::new();
        let mut sql = format!("DELETE FROM {}", self.table_sql()?);

        self.push_where(&mut sql, &mut params)?;
        self.push_pagination(&mut sql, &mut params)?;

        self.finish(StatementKind::Delete, sql, params)
    }
}
