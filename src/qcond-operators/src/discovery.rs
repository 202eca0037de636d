//! Operator discovery
//!
//! Every built-in operator is listed once in [`OPERATORS`]. [`discover`]
//! checks each registration's metadata and loads it into a catalog; a bad
//! registration stops startup instead of being skipped.

use qcond_shared::TypeTag;

use crate::builtin;
use crate::catalog::{OperatorCatalog, OperatorDescriptor, OperatorFn};

/// Declarative metadata for one operator implementation
#[derive(Clone, Copy)]
pub struct OperatorRegistration {
    /// Operator name as written in queries
    pub name: &'static str,
    /// Field types the operator accepts
    pub field_types: &'static [TypeTag],
    /// Value types the operator accepts; the first is the resolver's fallback
    pub value_types: &'static [TypeTag],
    /// Human-readable description
    pub description: &'static str,
    /// Implementation
    pub func: OperatorFn,
    /// The operator discards its value, so it is never coerced
    pub ignores_value: bool,
}

impl std::fmt::Debug for OperatorRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistration")
            .field("name", &self.name)
            .field("field_types", &self.field_types)
            .field("value_types", &self.value_types)
            .finish_non_exhaustive()
    }
}

/// All built-in operators
pub static OPERATORS: &[OperatorRegistration] = &[
    builtin::equals::REGISTRATION,
    builtin::not_equals::REGISTRATION,
    builtin::greater_than::REGISTRATION,
    builtin::greater_than_equal::REGISTRATION,
    builtin::less_than::REGISTRATION,
    builtin::less_than_equal::REGISTRATION,
    builtin::like::REGISTRATION,
    builtin::starts_with::REGISTRATION,
    builtin::ends_with::REGISTRATION,
    builtin::is_null::REGISTRATION,
    builtin::is_not_null::REGISTRATION,
    builtin::day_equal::REGISTRATION,
    builtin::month_equal::REGISTRATION,
    builtin::year_equal::REGISTRATION,
    builtin::day_of_week::REGISTRATION,
    builtin::days_before::REGISTRATION,
    builtin::days_after::REGISTRATION,
    builtin::months_before::REGISTRATION,
    builtin::months_after::REGISTRATION,
    builtin::years_before::REGISTRATION,
    builtin::years_after::REGISTRATION,
];

/// Startup failure while loading operators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    /// A registration's metadata is unusable
    #[error("Operator '{name}' cannot be registered: {reason}")]
    InvalidOperator {
        /// Name of the failing registration
        name: String,
        /// What is wrong with it
        reason: String,
    },
}

impl DiscoveryError {
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        DiscoveryError::InvalidOperator {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

fn check(registration: &OperatorRegistration) -> Result<(), DiscoveryError> {
    let name = registration.name;
    if name.trim().is_empty() {
        return Err(DiscoveryError::invalid(name, "name cannot be empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(DiscoveryError::invalid(name, "name cannot contain whitespace"));
    }
    for (label, types) in [
        ("field", registration.field_types),
        ("value", registration.value_types),
    ] {
        if types.is_empty() {
            return Err(DiscoveryError::invalid(
                name,
                format!("no supported {label} types declared"),
            ));
        }
        if let Some(dup) = types
            .iter()
            .enumerate()
            .find_map(|(i, t)| types[..i].contains(t).then_some(t))
        {
            return Err(DiscoveryError::invalid(
                name,
                format!("{label} type {dup} declared twice"),
            ));
        }
    }
    Ok(())
}

/// Register every entry of `registrations` into `catalog`
///
/// All entries are checked before any is registered, so a failure leaves
/// the catalog untouched. Registering under an existing name replaces the
/// old operator; running discovery twice gives the same catalog as once.
pub fn discover(
    catalog: &mut OperatorCatalog,
    registrations: &[OperatorRegistration],
) -> Result<(), DiscoveryError> {
    for registration in registrations {
        check(registration)?;
    }

    for registration in registrations {
        let replaced = catalog.register(OperatorDescriptor {
            name: registration.name.to_string(),
            field_types: registration.field_types.to_vec(),
            value_types: registration.value_types.to_vec(),
            description: registration.description.to_string(),
            implementation: registration.func,
            ignores_value: registration.ignores_value,
        });
        if replaced {
            log::warn!("operator '{}' was already registered; replacing it", registration.name);
        } else {
            log::debug!(
                "registered operator '{}' (fields {:?}, values {:?})",
                registration.name,
                registration.field_types,
                registration.value_types
            );
        }
    }
    Ok(())
}

impl OperatorCatalog {
    /// Create a catalog holding every built-in operator
    pub fn builtin() -> Result<Self, DiscoveryError> {
        let mut catalog = Self::new();
        discover(&mut catalog, OPERATORS)?;
        log::debug!("operator catalog ready with {} operators", catalog.len());
        Ok(catalog)
    }
}
