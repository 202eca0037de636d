//! qcond-parser: Parser for qcond JSON filter queries
//!
//! This crate converts JSON-encoded filter queries into an Abstract Syntax
//! Tree. The input is a tagged union discriminated by a `type` field:
//! `AndQuery` / `OrQuery` composites over leaf comparisons whose kind
//! (`StringQuery`, `NumericQuery`, `DateQuery`, `BoolQuery`) declares the
//! field type of the column.
//!
//! # Quick Start
//!
//! ```rust
//! use qcond_parser::{QueryParser, Query};
//!
//! let parser = QueryParser::new();
//! let query = parser.parse(r#"{
//!     "type": "AndQuery",
//!     "children": [
//!         {"type": "StringQuery", "column": "status", "operator": "equals", "value": "active"}
//!     ]
//! }"#)?;
//!
//! match &query {
//!     Query::Composite { children, .. } => assert_eq!(children.len(), 1),
//!     Query::Field(_) => unreachable!(),
//! }
//! # Ok::<(), qcond_shared::QueryError>(())
//! ```
//!
//! # Error Handling
//!
//! Anything that is not JSON, does not match the grammar, or breaks a
//! structural rule (blank column, blank operator, non-scalar value) is
//! reported as [`QueryError::MalformedQuery`](qcond_shared::QueryError).
//! Raw values are never inspected here; coercion happens when the tree is
//! turned into a condition.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod ast;
mod parser;

// Re-export main types
pub use ast::*;
pub use parser::*;

// Re-export shared types
pub use qcond_shared::VERSION;
