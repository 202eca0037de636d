//! # qcond-filter
//!
//! Turns parsed qcond queries into backend conditions.
//!
//! This crate provides:
//! - The [`ConditionBackend`] seam a storage layer implements
//! - The recursive [`ConditionBuilder`]
//! - Placeholder substitution (`[me]`, `[today]`, custom names) over raw JSON
//! - The [`QueryEngine`] pipeline and the [`PersistenceExecutor`] hand-off

#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::uninlined_format_args
)]

pub mod backend;
pub mod builder;
pub mod context;
pub mod engine;
pub mod placeholder;

pub use backend::ConditionBackend;
pub use builder::ConditionBuilder;
pub use context::PlaceholderContext;
pub use engine::{PersistenceExecutor, QueryEngine};
pub use placeholder::{
    placeholder_name, PlaceholderFn, PlaceholderPolicy, PlaceholderRegistry, PlaceholderResolver,
};

/// Re-export commonly used types
pub use qcond_operators::{CompareOp, Comparison, OperatorCatalog};
pub use qcond_shared::{QueryError, Result};
