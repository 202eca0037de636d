//! `startsWith`

use qcond_shared::{Result, Value};

use super::{required_text, STRING};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_starts_with(input: &OperatorInput<'_>) -> Result<Comparison> {
    let prefix = required_text(input, "startsWith")?;
    Ok(Comparison::new(
        input.column,
        CompareOp::Like,
        Value::String(format!("{prefix}%")),
    ))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "startsWith",
    field_types: STRING,
    value_types: STRING,
    description: "Checks if a string field starts with a given pattern",
    func: op_starts_with,
    ignores_value: false,
};
