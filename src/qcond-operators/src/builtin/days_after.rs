//! `daysAfter`: the field's date lies `n` days before today

use qcond_shared::Result;

use super::{relative_date, Unit, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::Comparison;
use crate::discovery::OperatorRegistration;

pub fn op_days_after(input: &OperatorInput<'_>) -> Result<Comparison> {
    relative_date(input, "daysAfter", Unit::Days, -1)
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "daysAfter",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if today is a given number of days after a date field",
    func: op_days_after,
    ignores_value: false,
};
