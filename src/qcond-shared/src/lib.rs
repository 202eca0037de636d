//! qcond-shared: Shared types and utilities for qcond crates
//!
//! This crate contains the types every other qcond crate speaks: the
//! [`TypeTag`] used to describe field and value domains, the coerced
//! [`Value`], the conversion from raw JSON scalars into those values, and
//! the error taxonomy reported to callers.
//!
//! # Features
//!
//! - **Common Result Type**: `Result<T>` over [`QueryError`]
//! - **Value Coercion**: strict conversion of JSON scalars into typed values
//! - **Error Taxonomy**: one distinguishable kind per failure class
//! - **Version Information**: Build and version metadata

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::uninlined_format_args
)]

pub mod coerce;
pub mod error;
pub mod types;
pub mod value;

pub use coerce::coerce;
pub use error::{ErrorKind, QueryError};
pub use types::TypeTag;
pub use value::Value;

/// Result type alias for qcond operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common constants
pub mod constants {
    /// Date format used for parsing and rendering calendar dates
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Exact length of a `YYYY-MM-DD` date literal
    pub const DATE_LITERAL_LEN: usize = 10;

    /// Maximum nesting depth accepted for a query tree
    ///
    /// Each composite level takes two JSON levels (the object and its
    /// `children` array). At this depth the deepest valid query text still
    /// fits under `serde_json`'s decoder limit of 128 levels, so text and
    /// pre-decoded input are held to the same ceiling.
    pub const MAX_QUERY_DEPTH: usize = 63;
}
