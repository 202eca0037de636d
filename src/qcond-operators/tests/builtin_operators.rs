use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use qcond_operators::{CompareOp, Comparison, OperatorCatalog, OperatorInput, OperatorResolver};
use qcond_shared::{coerce, ErrorKind, TypeTag, Value};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 21).unwrap()
}

/// Resolve, coerce and apply, the way the condition builder does
fn build(
    catalog: &OperatorCatalog,
    operator: &str,
    field_type: TypeTag,
    raw: serde_json::Value,
) -> qcond_shared::Result<Comparison> {
    let resolved = OperatorResolver::new(catalog).resolve(operator, field_type)?;
    let value = coerce(&raw, resolved.value_type)?;
    resolved.apply(&OperatorInput {
        column: "col",
        value: &value,
        today: today(),
    })
}

#[test]
fn test_numeric_greater_than() {
    let catalog = OperatorCatalog::builtin().unwrap();
    let cmp = build(&catalog, "greaterThan", TypeTag::Numeric, json!(99.99)).unwrap();
    assert_eq!(cmp.op, CompareOp::Gt);
    assert_eq!(cmp.value.to_string(), "99.99");
}

#[test]
fn test_date_equals_today_literal() {
    let catalog = OperatorCatalog::builtin().unwrap();
    let cmp = build(&catalog, "equals", TypeTag::Date, json!("2025-08-21")).unwrap();
    assert_eq!(cmp.value, Value::Date(today()));
}

#[test]
fn test_string_field_with_ordered_operator_is_mismatch() {
    let catalog = OperatorCatalog::builtin().unwrap();
    let err = build(&catalog, "greaterThan", TypeTag::String, json!("abc")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_relative_operator_from_numeric_string() {
    let catalog = OperatorCatalog::builtin().unwrap();
    let cmp = build(&catalog, "daysAfter", TypeTag::Date, json!("7")).unwrap();
    assert_eq!(
        cmp,
        Comparison::new(
            "col",
            CompareOp::DateEq,
            Value::Date(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap())
        )
    );
}

#[test]
fn test_day_of_week_with_text_is_coercion_error() {
    let catalog = OperatorCatalog::builtin().unwrap();
    let err = build(&catalog, "dayOfWeek", TypeTag::Date, json!("monday")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Coercion);
}

#[test]
fn test_is_null_accepts_any_value() {
    let catalog = OperatorCatalog::builtin().unwrap();
    for raw in [json!(null), json!("x"), json!(3), json!(true)] {
        let cmp = build(&catalog, "isNull", TypeTag::String, raw).unwrap();
        assert_eq!(cmp, Comparison::unary("col", CompareOp::IsNull));
    }
}

#[test]
fn test_metadata_queries() {
    let catalog = OperatorCatalog::builtin().unwrap();
    let names: Vec<_> = catalog
        .operators_for_field_type(TypeTag::Boolean)
        .into_iter()
        .map(|d| d.name.clone())
        .collect();
    assert_eq!(names, vec!["equals", "notEquals", "isNull", "isNotNull"]);

    let descriptor = catalog.descriptor("startsWith").unwrap();
    assert_eq!(descriptor.field_types, vec![TypeTag::String]);
    assert!(descriptor.description.contains("starts with"));
}
