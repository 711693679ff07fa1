use super::Builder;
use crate::error::{AsmError, AsmResult};
use crate::param::ParamList;
use crate::row::Row;
use crate::statement::{Statement, StatementKind};
use crate::trace;

impl Builder {
    /// Render a multi-row `INSERT INTO table(f1, f2) VALUES (?, ?), (?, ?)`.
    ///
    /// The column list comes from the first row. Later rows are written in
    /// their own field order; a row whose fields differ from the first row is
    /// logged but not rejected.
    ///
    /// Conditions, ordering and pagination are ignored.
    pub fn for_insert(&self, rows: &[Row]) -> AsmResult<Statement> {
        let Some(first) = rows.first() else {
            return Err(AsmError::validation("INSERT requires at least one row"));
        };
        if first.is_empty() {
            return Err(AsmError::validation("INSERT row has no fields"));
        }

        let dialect = self.dialect.as_ref();
        let mut params = ParamList::new();

        let fields: Vec<String> = first.fields().map(|f| dialect.quote_identifier(f)).collect();
        let mut sql = format!(
            "INSERT INTO {}({}) VALUES ",
            self.table_sql()?,
            fields.join(", ")
        );

        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
                if !row.fields().eq(first.fields()) {
                    trace::row_shape_mismatch(&self.table, i);
                }
            }
            sql.push('(');
            for (j, (_, value)) in row.iter().enumerate() {
                if j > 0 {
                    sql.push_str(", ");
                }
                params.bind(&mut sql, dialect, value);
            }
            sql.push(')');
        }

        self.finish(StatementKind::Insert, sql, params)
    }
}
