//! `dayOfWeek`: ISO day of week, Monday = 1 through Sunday = 7

use qcond_shared::Result;

use super::{component_equal, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_day_of_week(input: &OperatorInput<'_>) -> Result<Comparison> {
    component_equal(input, "dayOfWeek", CompareOp::DayOfWeekEq, Some(1..=7))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "dayOfWeek",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if the day component of a date field equals the specified day of the week, where Monday=1 and Sunday=7",
    func: op_day_of_week,
    ignores_value: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::*;

    #[test]
    fn test_day_of_week() {
        for day in 1..=7 {
            let cmp = apply(op_day_of_week, "created", &num(day)).unwrap();
            assert_eq!(cmp.op, CompareOp::DayOfWeekEq);
            assert_eq!(cmp.value, num(day));
        }
    }

    #[test]
    fn test_day_of_week_out_of_range() {
        assert!(apply(op_day_of_week, "created", &num(0)).is_err());
        assert!(apply(op_day_of_week, "created", &num(8)).is_err());
    }
}
