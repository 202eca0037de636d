//! `greaterThan`: ordered comparison on numeric and date fields

use qcond_shared::Result;

use super::{compare, ORDERED};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_greater_than(input: &OperatorInput<'_>) -> Result<Comparison> {
    Ok(compare(input, CompareOp::Gt))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "greaterThan",
    field_types: ORDERED,
    value_types: ORDERED,
    description: "Checks if a field is strictly greater than the given value",
    func: op_greater_than,
    ignores_value: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::*;
    use qcond_shared::Value;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn input<'a>(column: &'a str, value: &'a Value) -> OperatorInput<'a> {
        OperatorInput {
            column,
            value,
            today: today(),
        }
    }

    #[test]
    fn test_greater_than_numeric() {
        let value = Value::Numeric(Decimal::from_str("99.99").unwrap());
        let cmp = op_greater_than(&input("price", &value)).unwrap();
        assert_eq!(cmp, Comparison::new("price", CompareOp::Gt, value));
    }

    #[test]
    fn test_greater_than_date() {
        let value = Value::Date(date(2024, 1, 1));
        let cmp = op_greater_than(&input("created", &value)).unwrap();
        assert_eq!(cmp.op, CompareOp::Gt);
        assert_eq!(cmp.value, value);
    }
}
