//! Abstract Syntax Tree (AST) definitions for qcond queries
//!
//! A query is a tree of [`Query`] nodes: AND/OR composites over leaf
//! comparisons. Leaves keep their raw JSON value untouched; coercion
//! happens only when the tree is turned into a condition.

use qcond_shared::constants::MAX_QUERY_DEPTH;
use qcond_shared::{QueryError, Result, TypeTag};
use serde_json::Value as JsonValue;
use std::fmt;

/// A node of the query tree
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// AND/OR over an ordered list of children
    Composite {
        /// How the children are joined
        combinator: Combinator,
        /// Child nodes, in evaluation order
        children: Vec<Query>,
    },

    /// Single column/operator/value comparison
    Field(FieldQuery),
}

/// Binary join used by a composite node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Logical AND
    And,
    /// Logical OR
    Or,
}

impl Combinator {
    /// Discriminator used on the wire
    pub fn type_name(self) -> &'static str {
        match self {
            Combinator::And => "AndQuery",
            Combinator::Or => "OrQuery",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Declared value domain of a leaf
///
/// The kind fixes the field type the operator is checked against; it does
/// not name the comparison itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// `StringQuery`
    String,
    /// `NumericQuery`
    Numeric,
    /// `DateQuery`
    Date,
    /// `BoolQuery`
    Boolean,
}

impl LeafKind {
    /// Field type declared by this leaf kind
    pub fn field_type(self) -> TypeTag {
        match self {
            LeafKind::String => TypeTag::String,
            LeafKind::Numeric => TypeTag::Numeric,
            LeafKind::Date => TypeTag::Date,
            LeafKind::Boolean => TypeTag::Boolean,
        }
    }

    /// Discriminator used on the wire
    pub fn type_name(self) -> &'static str {
        match self {
            LeafKind::String => "StringQuery",
            LeafKind::Numeric => "NumericQuery",
            LeafKind::Date => "DateQuery",
            LeafKind::Boolean => "BoolQuery",
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A leaf comparison
#[derive(Debug, Clone, PartialEq)]
pub struct FieldQuery {
    /// Declared value domain
    pub kind: LeafKind,
    /// Column the comparison applies to
    pub column: String,
    /// Operator name, looked up in the catalog
    pub operator: String,
    /// Raw JSON scalar or null, coerced at evaluation time
    pub value: JsonValue,
    /// Value type fixed by the caller, if any
    pub value_type: Option<TypeTag>,
}

impl FieldQuery {
    /// Create a leaf without a fixed value type
    pub fn new(
        kind: LeafKind,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: JsonValue,
    ) -> Self {
        Self {
            kind,
            column: column.into(),
            operator: operator.into(),
            value,
            value_type: None,
        }
    }

    /// Fix the value type instead of letting the resolver choose one
    #[must_use]
    pub fn with_value_type(mut self, value_type: TypeTag) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Field type declared for this leaf's column
    pub fn field_type(&self) -> TypeTag {
        self.kind.field_type()
    }

    fn validate(&self) -> Result<()> {
        if self.column.trim().is_empty() {
            return Err(QueryError::malformed(format!(
                "{}: column cannot be empty",
                self.kind
            )));
        }
        if self.operator.trim().is_empty() {
            return Err(QueryError::malformed(format!(
                "{} on column '{}': operator cannot be empty",
                self.kind, self.column
            )));
        }
        if self.value.is_array() || self.value.is_object() {
            return Err(QueryError::malformed(format!(
                "{} on column '{}': value must be a scalar or null",
                self.kind, self.column
            )));
        }
        Ok(())
    }
}

impl Query {
    /// Build an AND composite
    pub fn and(children: Vec<Query>) -> Self {
        Query::Composite {
            combinator: Combinator::And,
            children,
        }
    }

    /// Build an OR composite
    pub fn or(children: Vec<Query>) -> Self {
        Query::Composite {
            combinator: Combinator::Or,
            children,
        }
    }

    /// Check structural rules that the grammar alone does not enforce
    ///
    /// Leaves need a column, an operator and a scalar value. Empty
    /// composites are accepted here and rejected during evaluation.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(1)
    }

    fn validate_at(&self, depth: usize) -> Result<()> {
        if depth > MAX_QUERY_DEPTH {
            return Err(QueryError::malformed(format!(
                "query nesting exceeds {MAX_QUERY_DEPTH} levels"
            )));
        }
        match self {
            Query::Composite { children, .. } => children
                .iter()
                .try_for_each(|child| child.validate_at(depth + 1)),
            Query::Field(field) => field.validate(),
        }
    }

    /// Number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Query::Composite { children, .. } => children.iter().map(Query::leaf_count).sum(),
            Query::Field(_) => 1,
        }
    }
}

impl From<FieldQuery> for Query {
    fn from(field: FieldQuery) -> Self {
        Query::Field(field)
    }
}
