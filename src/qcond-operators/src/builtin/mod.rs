//! Built-in operators
//!
//! Each module holds one operator: its implementation and the
//! [`OperatorRegistration`](crate::OperatorRegistration) that describes it.
//! The helpers below hold the checks shared by several operators.

pub mod day_equal;
pub mod day_of_week;
pub mod days_after;
pub mod days_before;
pub mod ends_with;
pub mod equals;
pub mod greater_than;
pub mod greater_than_equal;
pub mod is_not_null;
pub mod is_null;
pub mod less_than;
pub mod less_than_equal;
pub mod like;
pub mod month_equal;
pub mod months_after;
pub mod months_before;
pub mod not_equals;
pub mod starts_with;
pub mod year_equal;
pub mod years_after;
pub mod years_before;

use chrono::{Days, Months, NaiveDate};
use qcond_shared::{QueryError, Result, TypeTag, Value};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::ops::RangeInclusive;

use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};

/// Every type, in the order equality operators declare them
pub(crate) const ANY_TYPE: &[TypeTag] = &[
    TypeTag::String,
    TypeTag::Numeric,
    TypeTag::Boolean,
    TypeTag::Date,
];

/// Types with a total order
pub(crate) const ORDERED: &[TypeTag] = &[TypeTag::Numeric, TypeTag::Date];

pub(crate) const STRING: &[TypeTag] = &[TypeTag::String];
pub(crate) const DATE: &[TypeTag] = &[TypeTag::Date];
pub(crate) const NUMERIC: &[TypeTag] = &[TypeTag::Numeric];

/// Calendar unit for relative date operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    Days,
    Months,
    Years,
}

/// Compare the column against the value as given
pub(crate) fn compare(input: &OperatorInput<'_>, op: CompareOp) -> Comparison {
    Comparison::new(input.column, op, input.value.clone())
}

fn rejected(input: &OperatorInput<'_>, target: TypeTag, reason: String) -> QueryError {
    QueryError::coercion(input.value.to_string(), target, reason).with_column(input.column)
}

/// The value as text, rejecting null
pub(crate) fn required_text<'a>(input: &OperatorInput<'a>, operator: &str) -> Result<&'a str> {
    match input.value {
        Value::String(text) => Ok(text),
        _ => Err(rejected(
            input,
            TypeTag::String,
            format!("{operator} requires a text value"),
        )),
    }
}

/// The value as a whole number, rejecting null and fractions
pub(crate) fn whole_number(input: &OperatorInput<'_>, operator: &str) -> Result<i64> {
    let Value::Numeric(n) = input.value else {
        return Err(rejected(
            input,
            TypeTag::Numeric,
            format!("{operator} requires a number"),
        ));
    };
    if !n.fract().is_zero() {
        return Err(rejected(
            input,
            TypeTag::Numeric,
            format!("{operator} requires a whole number"),
        ));
    }
    n.to_i64().ok_or_else(|| {
        rejected(
            input,
            TypeTag::Numeric,
            format!("{operator} value is out of range"),
        )
    })
}

/// Compare one date component of the column against a whole number in `range`
pub(crate) fn component_equal(
    input: &OperatorInput<'_>,
    operator: &str,
    op: CompareOp,
    range: Option<RangeInclusive<i64>>,
) -> Result<Comparison> {
    let n = whole_number(input, operator)?;
    if let Some(range) = range {
        if !range.contains(&n) {
            return Err(rejected(
                input,
                TypeTag::Numeric,
                format!(
                    "{operator} expects a value between {} and {}",
                    range.start(),
                    range.end()
                ),
            ));
        }
    }
    Ok(Comparison::new(input.column, op, Value::Numeric(Decimal::from(n))))
}

/// Compare the column's date against today shifted by `sign * value` units
pub(crate) fn relative_date(
    input: &OperatorInput<'_>,
    operator: &str,
    unit: Unit,
    sign: i64,
) -> Result<Comparison> {
    let n = whole_number(input, operator)?;
    let target = n
        .checked_mul(sign)
        .and_then(|offset| shift(input.today, unit, offset))
        .ok_or_else(|| {
            rejected(
                input,
                TypeTag::Numeric,
                format!("{operator} moves the date out of range"),
            )
        })?;
    log::trace!("{operator}: {} -> {}", input.today, target);
    Ok(Comparison::new(input.column, CompareOp::DateEq, Value::Date(target)))
}

/// Move `date` by `offset` units, clamping to the end of shorter months
pub(crate) fn shift(date: NaiveDate, unit: Unit, offset: i64) -> Option<NaiveDate> {
    match unit {
        Unit::Days => {
            let days = Days::new(offset.unsigned_abs());
            if offset >= 0 {
                date.checked_add_days(days)
            } else {
                date.checked_sub_days(days)
            }
        }
        Unit::Months | Unit::Years => {
            let months = if unit == Unit::Years {
                offset.checked_mul(12)?
            } else {
                offset
            };
            let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
            if months >= 0 {
                date.checked_add_months(step)
            } else {
                date.checked_sub_months(step)
            }
        }
    }
}
