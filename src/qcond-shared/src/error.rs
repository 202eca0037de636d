//! Error types for qcond
//!
//! All failures a request can produce are deterministic input-validation
//! failures. Each one is a variant of [`QueryError`] and carries enough
//! context (operator, column, value, placeholder) for a caller to build a
//! descriptive rejection without parsing the message.

use crate::types::TypeTag;
use std::fmt;

/// Errors that can occur while turning a JSON query into a condition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The input is not JSON or does not match the query grammar
    #[error("Malformed query: {message}")]
    MalformedQuery {
        /// What was wrong with the input
        message: String,
    },

    /// The operator name has no registrations at all
    #[error("Unknown operator '{operator}'")]
    UnknownOperator {
        /// The operator name as written in the query
        operator: String,
    },

    /// The operator exists but not for this field type / value type pair
    #[error(
        "Operator '{operator}' does not support field type {field_type} with value type {value_type}"
    )]
    TypeMismatch {
        /// The operator name
        operator: String,
        /// Declared type of the field
        field_type: TypeTag,
        /// Value type that was attempted
        value_type: TypeTag,
    },

    /// An AND/OR node without children
    #[error("{combinator} requires at least one child")]
    EmptyComposite {
        /// Combinator name (`AndQuery` or `OrQuery`)
        combinator: String,
    },

    /// A raw value could not be converted into the required type
    #[error("Cannot coerce {value} to {target}{}: {reason}", at_column(.column))]
    Coercion {
        /// Rendering of the offending raw value
        value: String,
        /// Type the value had to be converted into
        target: TypeTag,
        /// Column of the leaf the value belongs to, when known
        column: Option<String>,
        /// Why the conversion failed
        reason: String,
    },

    /// A placeholder token has no registered resolver
    #[error("No resolver registered for placeholder '[{placeholder}]'")]
    UnresolvedPlaceholder {
        /// Placeholder name without brackets
        placeholder: String,
    },
}

fn at_column(column: &Option<String>) -> String {
    match column {
        Some(column) => format!(" for column '{column}'"),
        None => String::new(),
    }
}

/// Fieldless discriminant of [`QueryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`QueryError::MalformedQuery`]
    MalformedQuery,
    /// See [`QueryError::UnknownOperator`]
    UnknownOperator,
    /// See [`QueryError::TypeMismatch`]
    TypeMismatch,
    /// See [`QueryError::EmptyComposite`]
    EmptyComposite,
    /// See [`QueryError::Coercion`]
    Coercion,
    /// See [`QueryError::UnresolvedPlaceholder`]
    UnresolvedPlaceholder,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MalformedQuery => "MalformedQueryError",
            ErrorKind::UnknownOperator => "UnknownOperatorError",
            ErrorKind::TypeMismatch => "TypeMismatchError",
            ErrorKind::EmptyComposite => "EmptyCompositeError",
            ErrorKind::Coercion => "CoercionError",
            ErrorKind::UnresolvedPlaceholder => "UnresolvedPlaceholderError",
        };
        f.write_str(name)
    }
}

impl QueryError {
    /// Create a malformed query error
    pub fn malformed(message: impl Into<String>) -> Self {
        QueryError::MalformedQuery {
            message: message.into(),
        }
    }

    /// Create an unknown operator error
    pub fn unknown_operator(operator: impl Into<String>) -> Self {
        QueryError::UnknownOperator {
            operator: operator.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        operator: impl Into<String>,
        field_type: TypeTag,
        value_type: TypeTag,
    ) -> Self {
        QueryError::TypeMismatch {
            operator: operator.into(),
            field_type,
            value_type,
        }
    }

    /// Create an empty composite error
    pub fn empty_composite(combinator: impl Into<String>) -> Self {
        QueryError::EmptyComposite {
            combinator: combinator.into(),
        }
    }

    /// Create a coercion error without column information
    pub fn coercion(value: impl Into<String>, target: TypeTag, reason: impl Into<String>) -> Self {
        QueryError::Coercion {
            value: value.into(),
            target,
            column: None,
            reason: reason.into(),
        }
    }

    /// Create an unresolved placeholder error
    pub fn unresolved_placeholder(placeholder: impl Into<String>) -> Self {
        QueryError::UnresolvedPlaceholder {
            placeholder: placeholder.into(),
        }
    }

    /// Attach a column to a coercion error that does not name one yet
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_column(self, column: &str) -> Self {
        match self {
            QueryError::Coercion {
                value,
                target,
                column: None,
                reason,
            } => QueryError::Coercion {
                value,
                target,
                column: Some(column.to_string()),
                reason,
            },
            other => other,
        }
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::MalformedQuery { .. } => ErrorKind::MalformedQuery,
            QueryError::UnknownOperator { .. } => ErrorKind::UnknownOperator,
            QueryError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            QueryError::EmptyComposite { .. } => ErrorKind::EmptyComposite,
            QueryError::Coercion { .. } => ErrorKind::Coercion,
            QueryError::UnresolvedPlaceholder { .. } => ErrorKind::UnresolvedPlaceholder,
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::malformed(err.to_string())
    }
}
