//! `dayEqual`: day of month of a date field

use qcond_shared::Result;

use super::{component_equal, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_day_equal(input: &OperatorInput<'_>) -> Result<Comparison> {
    component_equal(input, "dayEqual", CompareOp::DayEq, Some(1..=31))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "dayEqual",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if the day component of a date field equals the specified day of the month",
    func: op_day_equal,
    ignores_value: false,
};
