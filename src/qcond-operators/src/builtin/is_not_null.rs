//! `isNotNull`: field has a value; the supplied value is discarded

use qcond_shared::Result;

use super::ANY_TYPE;
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_is_not_null(input: &OperatorInput<'_>) -> Result<Comparison> {
    Ok(Comparison::unary(input.column, CompareOp::IsNotNull))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "isNotNull",
    field_types: ANY_TYPE,
    value_types: ANY_TYPE,
    description: "Checks if a field is not null",
    func: op_is_not_null,
    ignores_value: true,
};
