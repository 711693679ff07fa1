//! # sqlasm
//!
//! A dialect-agnostic SQL statement assembler.
//!
//! ## Features
//!
//! - **Condition streams**: predicates, raw fragments, AND/OR and parentheses
//!   appended left to right and rendered exactly in that order
//! - **Four generators**: SELECT, DELETE, multi-row INSERT and UPDATE
//! - **Dialects**: identifier quoting and placeholder numbering for ANSI,
//!   PostgreSQL (`$1`, `$2`, ...) and MySQL
//! - **Two output modes**: SQL plus positional parameters, or SQL with the
//!   parameters inlined as escaped literals
//! - **Quote-aware rewriting**: `?` inside string literals and quoted
//!   identifiers is never treated as a marker
//!
//! ## Example
//!
//! ```ignore
//! use sqlasm::{Builder, Postgres, Row};
//!
//! let mut b = Builder::new(Postgres);
//! b.table("users")
//!     .grouped(|b| b.eq("status", "active").and().gte("age", 18))
//!     .or()
//!     .eq("role", "admin")
//!     .desc("created_at")
//!     .limit(20);
//!
//! let stmt = b.for_select()?;
//! // SELECT * FROM "users" WHERE ("status" = $1 AND "age" >= $2) OR "role" = $3
//! //   ORDER BY created_at DESC LIMIT $4
//!
//! let stmt = b.for_update(&Row::new().set("status", "inactive"))?;
//! let stmt = b.for_insert(&[Row::new().set("name", "alice").set("age", 30)])?;
//! ```

pub mod builder;
pub mod condition;
pub mod config;
pub mod dialect;
pub mod error;
pub mod param;
pub mod placeholder;
pub mod predicate;
pub mod row;
pub mod statement;
pub mod value;

mod trace;

pub use builder::{Builder, Column, OrderBy, Pagination, SortDir};
pub use condition::{ConditionStream, Token};
pub use config::RenderOptions;
pub use dialect::{Ansi, Dialect, MySql, Postgres};
pub use error::{AsmError, AsmResult};
pub use param::ParamList;
pub use predicate::{Op, Predicate, PredicateId, PredicateRegistry};
pub use row::Row;
pub use statement::{Statement, StatementKind};
pub use value::Value;
