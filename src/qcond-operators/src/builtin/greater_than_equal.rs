//! `greaterThanEqual`

use qcond_shared::Result;

use super::{compare, ORDERED};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_greater_than_equal(input: &OperatorInput<'_>) -> Result<Comparison> {
    Ok(compare(input, CompareOp::Ge))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "greaterThanEqual",
    field_types: ORDERED,
    value_types: ORDERED,
    description: "Checks if a field is greater than or equal to the given value",
    func: op_greater_than_equal,
    ignores_value: false,
};
