use crate::dialect::Dialect;
use crate::error::{AsmError, AsmResult};
use crate::param::ParamList;
use crate::value::Value;

/// LIMIT/OFFSET state. `None` means the clause is not emitted; `Some(0)` is
/// emitted like any other value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    /// Create a new empty pagination (no limit/offset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create pagination from page number and page size.
    ///
    /// Page numbers start at 1. Returns error if page < 1, if per_page < 0,
    /// or if the resulting offset does not fit in an `i64`.
    pub fn page(page: i64, per_page: i64) -> AsmResult<Self> {
        if page < 1 {
            return Err(AsmError::validation(format!(
                "page must be >= 1, got {page}"
            )));
        }
        if per_page < 0 {
            return Err(AsmError::validation(format!(
                "per_page must be >= 0, got {per_page}"
            )));
        }
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| AsmError::validation("page offset overflows i64"))?;
        Ok(Self {
            limit: Some(per_page),
            offset: Some(offset),
        })
    }

    /// Check if pagination is set.
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }

    /// Append ` LIMIT ?` / ` OFFSET ?` with one bound value each.
    pub fn append_to(
        &self,
        sql: &mut String,
        dialect: &dyn Dialect,
        params: &mut ParamList,
    ) -> AsmResult<()> {
        if let Some(limit) = self.limit {
            if limit < 0 {
                return Err(AsmError::validation(format!(
                    "limit must be >= 0, got {limit}"
                )));
            }
            sql.push_str(" LIMIT ");
            params.bind(sql, dialect, &Value::Int(limit));
        }
        if let Some(offset) = self.offset {
            if offset < 0 {
                return Err(AsmError::validation(format!(
                    "offset must be >= 0, got {offset}"
                )));
            }
            sql.push_str(" OFFSET ");
            params.bind(sql, dialect, &Value::Int(offset));
        }
        Ok(())
    }
}
