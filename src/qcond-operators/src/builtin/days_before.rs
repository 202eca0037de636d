//! `daysBefore`: the field's date lies `n` days after today
//!
//! Today is `n` days before the field. Negative counts flip the direction.

use qcond_shared::Result;

use super::{relative_date, Unit, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::Comparison;
use crate::discovery::OperatorRegistration;

pub fn op_days_before(input: &OperatorInput<'_>) -> Result<Comparison> {
    relative_date(input, "daysBefore", Unit::Days, 1)
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "daysBefore",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if today is a given number of days before a date field",
    func: op_days_before,
    ignores_value: false,
};
