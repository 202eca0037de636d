//! Operators for qcond
//!
//! This crate provides the operator catalog used to type-check and build
//! leaf comparisons: every built-in operator, the explicit registration
//! table that loads them, and the resolver that picks a value type for a
//! given field type.
//!
//! The catalog is built once at startup and is read-only afterwards:
//!
//! ```rust
//! use qcond_operators::{OperatorCatalog, OperatorResolver};
//! use qcond_shared::TypeTag;
//!
//! let catalog = OperatorCatalog::builtin()?;
//! let resolver = OperatorResolver::new(&catalog);
//! let resolved = resolver.resolve("greaterThan", TypeTag::Numeric)?;
//! assert_eq!(resolved.value_type, TypeTag::Numeric);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::uninlined_format_args
)]

pub mod builtin;
pub mod catalog;
pub mod comparison;
pub mod discovery;
pub mod resolver;

pub use catalog::{OperatorCatalog, OperatorDescriptor, OperatorFn, OperatorInput};
pub use comparison::{CompareOp, Comparison};
pub use discovery::{discover, DiscoveryError, OperatorRegistration, OPERATORS};
pub use resolver::{OperatorResolver, ResolvedOperator};
