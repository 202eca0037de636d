//! qcond-sql: reference SQL backend for qcond
//!
//! [`SqlBackend`] implements [`qcond_filter::ConditionBackend`] by building a
//! [`SqlCondition`] tree and rendering it to inline SQL text for a chosen
//! [`SqlDialect`]. Literals are written inline, so the output is meant for
//! inspection and tests rather than for executing untrusted input.
//!
//! ```
//! use qcond_filter::{PlaceholderContext, QueryEngine};
//! use qcond_sql::{SqlBackend, SqlDialect};
//!
//! let engine = QueryEngine::builtin(SqlBackend::new(SqlDialect::Postgres)).unwrap();
//! let ctx = PlaceholderContext::for_today("user-1");
//! let sql = engine
//!     .render(
//!         r#"{"type":"StringQuery","column":"owner","operator":"equals","value":"[me]"}"#,
//!         &ctx,
//!     )
//!     .unwrap();
//! assert_eq!(sql, "\"owner\" = 'user-1'");
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod condition;
pub mod dialect;

pub use condition::{SqlBackend, SqlCondition};
pub use dialect::{ParseDialectError, SqlDialect};

/// Render `SELECT * FROM <table> WHERE <condition>` with the default dialect
pub fn render_select(table: &str, condition: &SqlCondition) -> String {
    SqlBackend::default().render_select(table, condition)
}
