//! Operator catalog
//!
//! The catalog maps an operator name to its descriptor and dispatches
//! `(name, field type, value type)` to an implementation. It performs no
//! coercion and no defaulting; a miss is reported as `None` and the caller
//! decides what that means.

use chrono::NaiveDate;
use indexmap::IndexMap;
use qcond_shared::{Result, TypeTag, Value};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::comparison::Comparison;

/// Arguments handed to an operator implementation
#[derive(Debug, Clone, Copy)]
pub struct OperatorInput<'a> {
    /// Column reference the comparison applies to
    pub column: &'a str,
    /// Coerced value, possibly null
    pub value: &'a Value,
    /// Evaluation date used by relative operators
    pub today: NaiveDate,
}

/// Operator implementation
pub type OperatorFn = fn(&OperatorInput<'_>) -> Result<Comparison>;

/// Metadata and implementation of one named operator
#[derive(Clone, Serialize)]
pub struct OperatorDescriptor {
    /// Operator name as written in queries
    pub name: String,
    /// Field types the operator accepts, in declaration order
    pub field_types: Vec<TypeTag>,
    /// Value types the operator accepts, in declaration order
    pub value_types: Vec<TypeTag>,
    /// Human-readable description
    pub description: String,
    /// Implementation
    #[serde(skip)]
    pub implementation: OperatorFn,
    /// The operator discards its value
    pub ignores_value: bool,
}

impl OperatorDescriptor {
    /// Whether the field type / value type pair is supported
    pub fn supports(&self, field_type: TypeTag, value_type: TypeTag) -> bool {
        self.field_types.contains(&field_type) && self.value_types.contains(&value_type)
    }
}

impl fmt::Debug for OperatorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDescriptor")
            .field("name", &self.name)
            .field("field_types", &self.field_types)
            .field("value_types", &self.value_types)
            .field("description", &self.description)
            .field("ignores_value", &self.ignores_value)
            .finish_non_exhaustive()
    }
}

struct CatalogEntry {
    descriptor: OperatorDescriptor,
    dispatch: HashMap<(TypeTag, TypeTag), OperatorFn>,
}

impl CatalogEntry {
    fn new(descriptor: OperatorDescriptor) -> Self {
        let mut dispatch = HashMap::new();
        for &field_type in &descriptor.field_types {
            for &value_type in &descriptor.value_types {
                dispatch.insert((field_type, value_type), descriptor.implementation);
            }
        }
        Self {
            descriptor,
            dispatch,
        }
    }
}

/// Table of named operators
///
/// Built once at startup and read-only afterwards; it is `Send + Sync` and
/// can be shared behind an `Arc` across any number of requests.
#[derive(Default)]
pub struct OperatorCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl fmt::Debug for OperatorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OperatorCatalog {{ operators: {} operators }}",
            self.entries.len()
        )
    }
}

impl OperatorCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operator, replacing any previous one with the same name
    ///
    /// Returns `true` when an existing registration was replaced. A replaced
    /// operator keeps its position in [`operator_names`](Self::operator_names).
    pub fn register(&mut self, descriptor: OperatorDescriptor) -> bool {
        let name = descriptor.name.clone();
        self.entries
            .insert(name, CatalogEntry::new(descriptor))
            .is_some()
    }

    /// Look up the implementation for a name, field type and value type
    pub fn lookup(
        &self,
        name: &str,
        field_type: TypeTag,
        value_type: TypeTag,
    ) -> Option<OperatorFn> {
        self.entries
            .get(name)?
            .dispatch
            .get(&(field_type, value_type))
            .copied()
    }

    /// Value types declared for `name`, empty for unknown names
    pub fn supported_value_types(&self, name: &str) -> &[TypeTag] {
        match self.entries.get(name) {
            Some(entry) => &entry.descriptor.value_types,
            None => &[],
        }
    }

    /// Check if an operator exists
    pub fn has_operator(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get an operator's descriptor
    pub fn descriptor(&self, name: &str) -> Option<&OperatorDescriptor> {
        self.entries.get(name).map(|entry| &entry.descriptor)
    }

    /// Operator names in registration order
    pub fn operator_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &OperatorDescriptor> {
        self.entries.values().map(|entry| &entry.descriptor)
    }

    /// Descriptors of every operator that accepts `field_type`
    pub fn operators_for_field_type(&self, field_type: TypeTag) -> Vec<&OperatorDescriptor> {
        self.descriptors()
            .filter(|descriptor| descriptor.field_types.contains(&field_type))
            .collect()
    }

    /// Get the number of registered operators
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no operator is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
