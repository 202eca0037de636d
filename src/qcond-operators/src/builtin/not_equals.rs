//! `notEquals`: field differs from the value

use qcond_shared::Result;

use super::{compare, ANY_TYPE};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_not_equals(input: &OperatorInput<'_>) -> Result<Comparison> {
    Ok(compare(input, CompareOp::Ne))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "notEquals",
    field_types: ANY_TYPE,
    value_types: ANY_TYPE,
    description: "Checks if a field does not equal the given value",
    func: op_not_equals,
    ignores_value: false,
};
