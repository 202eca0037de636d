//! JSON parsing for qcond queries
//!
//! The wire format is a tagged union: every object carries a `type`
//! discriminator that selects its shape.
//!
//! ```text
//! Composite := { "type": "AndQuery"|"OrQuery", "children": [Node, ...] }
//! Leaf      := { "type": <LeafKind>, "column": string, "operator": string,
//!                "value": <scalar|null>, "valueType"?: <TypeTag> }
//! ```

use crate::ast::{Combinator, FieldQuery, LeafKind, Query};
use qcond_shared::constants::MAX_QUERY_DEPTH;
use qcond_shared::{QueryError, Result, TypeTag};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Wire shape of a query node
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum QueryNode {
    AndQuery { children: Vec<QueryNode> },
    OrQuery { children: Vec<QueryNode> },
    StringQuery(LeafNode),
    #[serde(alias = "IntQuery")]
    NumericQuery(LeafNode),
    DateQuery(LeafNode),
    #[serde(alias = "BooleanQuery")]
    BoolQuery(LeafNode),
}

#[derive(Debug, Deserialize)]
struct LeafNode {
    column: String,
    #[serde(alias = "operatorName")]
    operator: String,
    #[serde(default)]
    value: JsonValue,
    #[serde(default, rename = "valueType")]
    value_type: Option<TypeTag>,
}

impl LeafNode {
    fn into_field(self, kind: LeafKind) -> FieldQuery {
        FieldQuery {
            kind,
            column: self.column,
            operator: self.operator,
            value: self.value,
            value_type: self.value_type,
        }
    }
}

impl From<QueryNode> for Query {
    fn from(node: QueryNode) -> Self {
        match node {
            QueryNode::AndQuery { children } => Query::Composite {
                combinator: Combinator::And,
                children: children.into_iter().map(Query::from).collect(),
            },
            QueryNode::OrQuery { children } => Query::Composite {
                combinator: Combinator::Or,
                children: children.into_iter().map(Query::from).collect(),
            },
            QueryNode::StringQuery(leaf) => Query::Field(leaf.into_field(LeafKind::String)),
            QueryNode::NumericQuery(leaf) => Query::Field(leaf.into_field(LeafKind::Numeric)),
            QueryNode::DateQuery(leaf) => Query::Field(leaf.into_field(LeafKind::Date)),
            QueryNode::BoolQuery(leaf) => Query::Field(leaf.into_field(LeafKind::Boolean)),
        }
    }
}

/// Parser for JSON-encoded queries
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryParser;

impl QueryParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse query text
    pub fn parse(&self, input: &str) -> Result<Query> {
        if input.trim().is_empty() {
            return Err(QueryError::malformed("query JSON cannot be empty"));
        }
        let json: JsonValue = serde_json::from_str(input)?;
        self.parse_value(json)
    }

    /// Parse an already-decoded JSON tree
    ///
    /// The result has passed [`Query::validate`].
    pub fn parse_value(&self, json: JsonValue) -> Result<Query> {
        check_nesting(&json)?;
        let node: QueryNode = serde_json::from_value(json)?;
        let query = Query::from(node);
        query.validate()?;
        log::trace!("parsed query with {} leaves", query.leaf_count());
        Ok(query)
    }
}

/// Reject JSON nested deeper than the query tree may go, without recursing
fn check_nesting(json: &JsonValue) -> Result<()> {
    // Each query level is an object holding a children array
    let limit = MAX_QUERY_DEPTH * 2;
    let mut stack = vec![(json, 1usize)];
    while let Some((node, depth)) = stack.pop() {
        if depth > limit {
            return Err(QueryError::malformed(format!(
                "query nesting exceeds {MAX_QUERY_DEPTH} levels"
            )));
        }
        match node {
            JsonValue::Array(items) => stack.extend(items.iter().map(|item| (item, depth + 1))),
            JsonValue::Object(map) => stack.extend(map.values().map(|item| (item, depth + 1))),
            _ => {}
        }
    }
    Ok(())
}

/// Convenience function to parse query text
pub fn parse_query(input: &str) -> Result<Query> {
    QueryParser::new().parse(input)
}
