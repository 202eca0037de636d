//! Value coercion
//!
//! Converts raw JSON scalars into typed [`Value`]s. The rules are strict:
//! nothing is guessed, nothing rolls over, and every rejection names the
//! value and the target type.
//!
//! | target    | accepted raw input                                             |
//! |-----------|----------------------------------------------------------------|
//! | `STRING`  | any scalar, rendered as text                                   |
//! | `BOOLEAN` | booleans; `"true"`/`"false"` in any case; `"null"` → null       |
//! | `DATE`    | `YYYY-MM-DD` strings; numbers or numeric strings → numeric     |
//! | `NUMERIC` | numbers; numeric strings                                       |
//!
//! `null` coerces to null for every target.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Number as JsonNumber, Value as JsonValue};
use std::str::FromStr;

use crate::constants::{DATE_FORMAT, DATE_LITERAL_LEN};
use crate::error::QueryError;
use crate::types::TypeTag;
use crate::value::Value;
use crate::Result;

/// Coerce a raw JSON value into `target`
pub fn coerce(raw: &JsonValue, target: TypeTag) -> Result<Value> {
    if raw.is_null() {
        return Ok(Value::Null);
    }
    if raw.is_array() || raw.is_object() {
        return Err(QueryError::coercion(
            raw.to_string(),
            target,
            "expected a scalar value",
        ));
    }

    match target {
        TypeTag::String => Ok(Value::String(scalar_text(raw))),
        TypeTag::Boolean => coerce_boolean(raw),
        TypeTag::Date => coerce_date(raw),
        TypeTag::Numeric => coerce_numeric(raw),
    }
}

fn scalar_text(raw: &JsonValue) -> String {
    match raw {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_boolean(raw: &JsonValue) -> Result<Value> {
    match raw {
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            _ => Err(QueryError::coercion(
                raw.to_string(),
                TypeTag::Boolean,
                "expected true, false or null",
            )),
        },
        _ => Err(QueryError::coercion(
            raw.to_string(),
            TypeTag::Boolean,
            "expected a boolean",
        )),
    }
}

fn coerce_date(raw: &JsonValue) -> Result<Value> {
    match raw {
        JsonValue::String(s) => {
            let text = s.trim();
            if looks_like_date(text) {
                return parse_date(text).map(Value::Date).ok_or_else(|| {
                    QueryError::coercion(raw.to_string(), TypeTag::Date, "not a valid calendar date")
                });
            }
            // Relative operators take a count rather than an absolute date
            if let Some(n) = parse_decimal(text) {
                return Ok(Value::Numeric(n));
            }
            Err(QueryError::coercion(
                raw.to_string(),
                TypeTag::Date,
                "expected YYYY-MM-DD or a number",
            ))
        }
        JsonValue::Number(n) => number_to_decimal(n)
            .map(Value::Numeric)
            .ok_or_else(|| QueryError::coercion(n.to_string(), TypeTag::Date, "number out of range")),
        _ => Err(QueryError::coercion(
            raw.to_string(),
            TypeTag::Date,
            "expected YYYY-MM-DD or a number",
        )),
    }
}

fn coerce_numeric(raw: &JsonValue) -> Result<Value> {
    match raw {
        JsonValue::Number(n) => number_to_decimal(n).map(Value::Numeric).ok_or_else(|| {
            QueryError::coercion(n.to_string(), TypeTag::Numeric, "number out of range")
        }),
        JsonValue::String(s) => parse_decimal(s.trim()).map(Value::Numeric).ok_or_else(|| {
            QueryError::coercion(raw.to_string(), TypeTag::Numeric, "not a decimal number")
        }),
        _ => Err(QueryError::coercion(
            raw.to_string(),
            TypeTag::Numeric,
            "expected a number",
        )),
    }
}

/// `YYYY-MM-DD` shape check; calendar validity is checked by [`parse_date`]
fn looks_like_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == DATE_LITERAL_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a strict `YYYY-MM-DD` calendar date
///
/// Out-of-range components (month 13, February 30) are rejected rather
/// than rolled over.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if !looks_like_date(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a plain or scientific decimal literal
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let well_formed = !text.is_empty()
        && text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !well_formed {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn number_to_decimal(n: &JsonNumber) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    // Go through the textual form so 99.99 stays 99.99
    parse_decimal(&n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_null_passes_through_for_every_target() {
        for tag in TypeTag::ALL {
            assert_eq!(coerce(&JsonValue::Null, tag).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_string_target_renders_any_scalar() {
        assert_eq!(coerce(&json!("active"), TypeTag::String).unwrap(), Value::string("active"));
        assert_eq!(coerce(&json!(42), TypeTag::String).unwrap(), Value::string("42"));
        assert_eq!(coerce(&json!(true), TypeTag::String).unwrap(), Value::string("true"));
    }

    #[test]
    fn test_boolean_target() {
        assert_eq!(coerce(&json!(true), TypeTag::Boolean).unwrap(), Value::Bool(true));
        assert_eq!(coerce(&json!("TRUE"), TypeTag::Boolean).unwrap(), Value::Bool(true));
        assert_eq!(coerce(&json!("False"), TypeTag::Boolean).unwrap(), Value::Bool(false));
        assert_eq!(coerce(&json!("null"), TypeTag::Boolean).unwrap(), Value::Null);
        assert!(coerce(&json!("yes"), TypeTag::Boolean).is_err());
        assert!(coerce(&json!(1), TypeTag::Boolean).is_err());
    }

    #[test]
    fn test_date_target() {
        assert_eq!(
            coerce(&json!("2025-08-21"), TypeTag::Date).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2025, 8, 21).unwrap())
        );
        // Numeric strings and numbers become counts
        assert_eq!(coerce(&json!("5"), TypeTag::Date).unwrap(), Value::Numeric(dec("5")));
        assert_eq!(coerce(&json!(3), TypeTag::Date).unwrap(), Value::Numeric(dec("3")));
    }

    #[test]
    fn test_date_target_is_strict() {
        let err = coerce(&json!("2025-13-01"), TypeTag::Date).unwrap_err();
        assert!(err.to_string().contains("not a valid calendar date"));
        assert!(coerce(&json!("2025-02-30"), TypeTag::Date).is_err());
        assert!(coerce(&json!("2025-8-21"), TypeTag::Date).is_err());
        assert!(coerce(&json!("21/08/2025"), TypeTag::Date).is_err());
        assert!(coerce(&json!(true), TypeTag::Date).is_err());
    }

    #[test]
    fn test_numeric_target() {
        assert_eq!(coerce(&json!(99.99), TypeTag::Numeric).unwrap(), Value::Numeric(dec("99.99")));
        assert_eq!(coerce(&json!("  12.5 "), TypeTag::Numeric).unwrap(), Value::Numeric(dec("12.5")));
        assert_eq!(coerce(&json!(-7), TypeTag::Numeric).unwrap(), Value::Numeric(dec("-7")));
        assert_eq!(coerce(&json!("1e3"), TypeTag::Numeric).unwrap(), Value::Numeric(dec("1000")));
        assert!(coerce(&json!("abc"), TypeTag::Numeric).is_err());
        assert!(coerce(&json!("1_000"), TypeTag::Numeric).is_err());
        assert!(coerce(&json!(false), TypeTag::Numeric).is_err());
    }

    #[test]
    fn test_non_scalars_are_rejected() {
        for tag in TypeTag::ALL {
            assert!(coerce(&json!([1, 2]), tag).is_err());
            assert!(coerce(&json!({"a": 1}), tag).is_err());
        }
    }

    #[test]
    fn test_error_names_value_and_target() {
        let err = coerce(&json!("abc"), TypeTag::Numeric).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"abc\""));
        assert!(msg.contains("NUMERIC"));
    }

    proptest! {
        #[test]
        fn prop_date_round_trips(y in 1i32..=9999, m in 1u32..=12, d in 1u32..=28) {
            let text = format!("{:04}-{:02}-{:02}", y, m, d);
            let value = coerce(&JsonValue::String(text.clone()), TypeTag::Date).unwrap();
            prop_assert_eq!(value.to_string(), text);
        }
    }
}
