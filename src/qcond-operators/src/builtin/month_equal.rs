//! `monthEqual`

use qcond_shared::Result;

use super::{component_equal, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_month_equal(input: &OperatorInput<'_>) -> Result<Comparison> {
    component_equal(input, "monthEqual", CompareOp::MonthEq, Some(1..=12))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "monthEqual",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if the month component of a date field equals the specified month",
    func: op_month_equal,
    ignores_value: false,
};
