//! Type-aware operator resolution
//!
//! Given an operator name and the declared type of a field, the resolver
//! picks the value type the raw literal will be coerced into and binds the
//! matching implementation:
//!
//! 1. an operator with no registrations is an unknown operator;
//! 2. if the field type is itself a supported value type, it wins;
//! 3. otherwise the first declared value type is used;
//! 4. if the catalog has no entry for the field type and that value type,
//!    the pair is a type mismatch.

use qcond_shared::{QueryError, Result, TypeTag};

use crate::catalog::{OperatorCatalog, OperatorFn, OperatorInput};
use crate::comparison::Comparison;

/// An operator bound to the value type its input must have
#[derive(Clone, Copy)]
pub struct ResolvedOperator {
    /// Implementation to invoke
    pub operator: OperatorFn,
    /// Type the raw value must be coerced into
    pub value_type: TypeTag,
    /// The operator discards its value; callers may skip coercion
    pub ignores_value: bool,
}

impl ResolvedOperator {
    /// Invoke the bound implementation
    pub fn apply(&self, input: &OperatorInput<'_>) -> Result<Comparison> {
        (self.operator)(input)
    }
}

impl std::fmt::Debug for ResolvedOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedOperator")
            .field("value_type", &self.value_type)
            .field("ignores_value", &self.ignores_value)
            .finish_non_exhaustive()
    }
}

/// Resolves operator names against a catalog
#[derive(Debug, Clone, Copy)]
pub struct OperatorResolver<'a> {
    catalog: &'a OperatorCatalog,
}

impl<'a> OperatorResolver<'a> {
    /// Create a resolver over `catalog`
    pub fn new(catalog: &'a OperatorCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this resolver reads
    pub fn catalog(&self) -> &'a OperatorCatalog {
        self.catalog
    }

    /// Resolve `name` for a field of `field_type`, choosing the value type
    pub fn resolve(&self, name: &str, field_type: TypeTag) -> Result<ResolvedOperator> {
        let supported = self.catalog.supported_value_types(name);
        let value_type = if supported.contains(&field_type) {
            field_type
        } else {
            match supported.first() {
                Some(&first) => first,
                None => return Err(QueryError::unknown_operator(name)),
            }
        };
        log::debug!("resolved '{name}' on {field_type} field to {value_type} value");
        self.bind(name, field_type, value_type)
    }

    /// Resolve `name` with a value type fixed by the caller
    pub fn resolve_with_value_type(
        &self,
        name: &str,
        field_type: TypeTag,
        value_type: TypeTag,
    ) -> Result<ResolvedOperator> {
        if !self.catalog.has_operator(name) {
            return Err(QueryError::unknown_operator(name));
        }
        self.bind(name, field_type, value_type)
    }

    fn bind(&self, name: &str, field_type: TypeTag, value_type: TypeTag) -> Result<ResolvedOperator> {
        let operator = self
            .catalog
            .lookup(name, field_type, value_type)
            .ok_or_else(|| QueryError::type_mismatch(name, field_type, value_type))?;
        let ignores_value = self
            .catalog
            .descriptor(name)
            .is_some_and(|descriptor| descriptor.ignores_value);
        Ok(ResolvedOperator {
            operator,
            value_type,
            ignores_value,
        })
    }
}
