//! `isNull`: field has no value
//!
//! The supplied value is discarded, whatever it is.

use qcond_shared::Result;

use super::ANY_TYPE;
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_is_null(input: &OperatorInput<'_>) -> Result<Comparison> {
    Ok(Comparison::unary(input.column, CompareOp::IsNull))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "isNull",
    field_types: ANY_TYPE,
    value_types: ANY_TYPE,
    description: "Checks if a field is null",
    func: op_is_null,
    ignores_value: true,
};
