//! `endsWith`

use qcond_shared::{Result, Value};

use super::{required_text, STRING};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_ends_with(input: &OperatorInput<'_>) -> Result<Comparison> {
    let suffix = required_text(input, "endsWith")?;
    Ok(Comparison::new(
        input.column,
        CompareOp::Like,
        Value::String(format!("%{suffix}")),
    ))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "endsWith",
    field_types: STRING,
    value_types: STRING,
    description: "Checks if a string field ends with a given pattern",
    func: op_ends_with,
    ignores_value: false,
};
