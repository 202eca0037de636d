//! `yearEqual`: any whole year is accepted

use qcond_shared::Result;

use super::{component_equal, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_year_equal(input: &OperatorInput<'_>) -> Result<Comparison> {
    component_equal(input, "yearEqual", CompareOp::YearEq, None)
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "yearEqual",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if the year component of a date field equals the specified year",
    func: op_year_equal,
    ignores_value: false,
};
