//! qcond: typed JSON filter queries compiled into query conditions
//!
//! This crate re-exports the public API of the qcond workspace:
//!
//! - [`shared`]: type tags, domain values, coercion and the error taxonomy
//! - [`parser`]: the query AST and its JSON parser
//! - [`operators`]: the operator catalog, discovery and type-aware resolution
//! - [`filter`]: placeholder substitution, condition building and the engine
//! - [`sql`]: a reference SQL backend (feature `sql`, on by default)
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "sql")]
//! # {
//! use qcond::{PlaceholderContext, QueryEngine};
//! use qcond::sql::{SqlBackend, SqlDialect};
//!
//! let engine = QueryEngine::builtin(SqlBackend::new(SqlDialect::Postgres)).unwrap();
//! let ctx = PlaceholderContext::for_today("u-1");
//! let sql = engine
//!     .render(
//!         r#"{"type":"AndQuery","children":[
//!             {"type":"NumericQuery","column":"price","operator":"greaterThan","value":99.99}
//!         ]}"#,
//!         &ctx,
//!     )
//!     .unwrap();
//! assert_eq!(sql, "\"price\" > 99.99");
//! # }
//! ```

pub use qcond_filter as filter;
pub use qcond_operators as operators;
pub use qcond_parser as parser;
pub use qcond_shared as shared;
#[cfg(feature = "sql")]
pub use qcond_sql as sql;

pub use qcond_filter::{
    ConditionBackend, PersistenceExecutor, PlaceholderContext, PlaceholderPolicy,
    PlaceholderRegistry, QueryEngine,
};
pub use qcond_operators::{CompareOp, Comparison, OperatorCatalog, OperatorResolver};
pub use qcond_parser::{Query, QueryParser};
pub use qcond_shared::{ErrorKind, QueryError, Result, TypeTag, Value, VERSION};
