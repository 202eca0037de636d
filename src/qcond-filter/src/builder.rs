//! Condition builder
//!
//! Walks a parsed [`Query`] depth-first and turns it into a backend
//! condition. Children are built in order and the first error stops the
//! walk; no partial condition is ever returned.
//!
//! Composites left-fold their children with the combinator, so
//! `[c1, c2, c3]` under AND becomes `(c1 AND c2) AND c3`, and a single child
//! is returned as-is without a join around it.

use chrono::NaiveDate;
use qcond_operators::{OperatorInput, OperatorResolver};
use qcond_parser::{Combinator, FieldQuery, Query};
use qcond_shared::{coerce, QueryError, Result, Value};

use crate::backend::ConditionBackend;

/// Builds backend conditions from query trees
#[derive(Debug, Clone, Copy)]
pub struct ConditionBuilder<'a, B> {
    resolver: OperatorResolver<'a>,
    backend: &'a B,
    today: NaiveDate,
}

impl<'a, B: ConditionBackend> ConditionBuilder<'a, B> {
    /// Create a builder; `today` anchors relative date operators
    pub fn new(resolver: OperatorResolver<'a>, backend: &'a B, today: NaiveDate) -> Self {
        Self {
            resolver,
            backend,
            today,
        }
    }

    /// Build the condition for `query`
    pub fn build(&self, query: &Query) -> Result<B::Condition> {
        match query {
            Query::Composite {
                combinator,
                children,
            } => self.build_composite(*combinator, children),
            Query::Field(field) => self.build_field(field),
        }
    }

    fn build_composite(&self, combinator: Combinator, children: &[Query]) -> Result<B::Condition> {
        if children.is_empty() {
            return Err(QueryError::empty_composite(combinator.type_name()));
        }

        let mut conditions = Vec::with_capacity(children.len());
        for child in children {
            conditions.push(self.build(child)?);
        }

        log::trace!("folding {} children with {}", conditions.len(), combinator);
        let mut conditions = conditions.into_iter();
        let mut folded = match conditions.next() {
            Some(first) => first,
            None => return Err(QueryError::empty_composite(combinator.type_name())),
        };
        for next in conditions {
            folded = match combinator {
                Combinator::And => self.backend.and(folded, next),
                Combinator::Or => self.backend.or(folded, next),
            };
        }
        Ok(folded)
    }

    fn build_field(&self, field: &FieldQuery) -> Result<B::Condition> {
        let field_type = field.field_type();
        let resolved = match field.value_type {
            Some(value_type) => {
                self.resolver
                    .resolve_with_value_type(&field.operator, field_type, value_type)?
            }
            None => self.resolver.resolve(&field.operator, field_type)?,
        };

        let value = if resolved.ignores_value {
            Value::Null
        } else {
            coerce(&field.value, resolved.value_type).map_err(|e| e.with_column(&field.column))?
        };

        let comparison = resolved.apply(&OperatorInput {
            column: &field.column,
            value: &value,
            today: self.today,
        })?;
        Ok(self.backend.compare(comparison))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcond_operators::{Comparison, OperatorCatalog};
    use qcond_parser::LeafKind;
    use qcond_shared::ErrorKind;
    use serde_json::json;
    use std::cell::RefCell;

    /// Renders conditions as text and records every comparison it sees
    #[derive(Default)]
    struct TextBackend {
        seen: RefCell<Vec<String>>,
    }

    impl ConditionBackend for TextBackend {
        type Condition = String;
        type Rendered = String;

        fn compare(&self, comparison: Comparison) -> String {
            let text = comparison.to_string();
            self.seen.borrow_mut().push(text.clone());
            text
        }

        fn and(&self, left: String, right: String) -> String {
            format!("({left} AND {right})")
        }

        fn or(&self, left: String, right: String) -> String {
            format!("({left} OR {right})")
        }

        fn render(&self, condition: &String) -> String {
            condition.clone()
        }
    }

    fn leaf(kind: LeafKind, column: &str, op: &str, value: serde_json::Value) -> Query {
        FieldQuery::new(kind, column, op, value).into()
    }

    fn build(query: &Query) -> (Result<String>, Vec<String>) {
        let catalog = OperatorCatalog::builtin().unwrap();
        let backend = TextBackend::default();
        let today = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap();
        let builder = ConditionBuilder::new(OperatorResolver::new(&catalog), &backend, today);
        let result = builder.build(query);
        (result, backend.seen.into_inner())
    }

    #[test]
    fn test_single_child_is_unwrapped() {
        let child = leaf(LeafKind::String, "status", "equals", json!("active"));
        let (alone, _) = build(&child);
        let (wrapped, _) = build(&Query::and(vec![child.clone()]));
        assert_eq!(wrapped.unwrap(), alone.unwrap());
        let (wrapped, _) = build(&Query::or(vec![child]));
        assert_eq!(wrapped.unwrap(), "status eq active");
    }

    #[test]
    fn test_left_fold() {
        let query = Query::and(vec![
            leaf(LeafKind::Numeric, "a", "equals", json!(1)),
            leaf(LeafKind::Numeric, "b", "equals", json!(2)),
            leaf(LeafKind::Numeric, "c", "equals", json!(3)),
        ]);
        let (result, _) = build(&query);
        assert_eq!(result.unwrap(), "((a eq 1 AND b eq 2) AND c eq 3)");
    }

    #[test]
    fn test_empty_composites_fail() {
        for query in [Query::and(vec![]), Query::or(vec![])] {
            let (result, _) = build(&query);
            assert_eq!(result.unwrap_err().kind(), ErrorKind::EmptyComposite);
        }
        let (result, _) = build(&Query::or(vec![]));
        assert_eq!(result.unwrap_err(), QueryError::empty_composite("OrQuery"));
    }

    #[test]
    fn test_nested_empty_composite_fails() {
        let query = Query::and(vec![
            leaf(LeafKind::String, "a", "equals", json!("x")),
            Query::or(vec![]),
        ]);
        let (result, _) = build(&query);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::EmptyComposite);
    }

    #[test]
    fn test_fail_fast_in_child_order() {
        let query = Query::or(vec![
            leaf(LeafKind::String, "a", "equals", json!("x")),
            leaf(LeafKind::String, "b", "betweenXYZ", json!("y")),
            leaf(LeafKind::Numeric, "c", "equals", json!("not a number")),
        ]);
        let (result, seen) = build(&query);
        assert_eq!(result.unwrap_err(), QueryError::unknown_operator("betweenXYZ"));
        // Only the first child reached the backend
        assert_eq!(seen, vec!["a eq x".to_string()]);
    }

    #[test]
    fn test_coercion_error_names_column() {
        let query = leaf(LeafKind::Numeric, "age", "equals", json!("abc"));
        let (result, _) = build(&query);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        assert!(err.to_string().contains("column 'age'"));
    }

    #[test]
    fn test_type_mismatch_before_coercion() {
        let query = leaf(LeafKind::String, "age", "greaterThan", json!("abc"));
        let (result, _) = build(&query);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_explicit_value_type() {
        let query: Query = FieldQuery::new(LeafKind::String, "code", "equals", json!("007"))
            .with_value_type(qcond_shared::TypeTag::Numeric)
            .into();
        let (result, _) = build(&query);
        assert_eq!(result.unwrap(), "code eq 7");
    }

    #[test]
    fn test_relative_operator_uses_builder_date() {
        let query = leaf(LeafKind::Date, "due", "daysBefore", json!(10));
        let (result, _) = build(&query);
        assert_eq!(result.unwrap(), "due dateEq 2025-08-31");
    }

    #[test]
    fn test_is_null_discards_value() {
        let a = build(&leaf(LeafKind::Date, "d", "isNull", json!(null))).0.unwrap();
        let b = build(&leaf(LeafKind::Date, "d", "isNull", json!("2020-01-01"))).0.unwrap();
        let c = build(&leaf(LeafKind::Date, "d", "isNull", json!("not a date"))).0.unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}
