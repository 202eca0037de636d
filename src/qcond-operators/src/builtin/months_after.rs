//! `monthsAfter`

use qcond_shared::Result;

use super::{relative_date, Unit, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::Comparison;
use crate::discovery::OperatorRegistration;

pub fn op_months_after(input: &OperatorInput<'_>) -> Result<Comparison> {
    relative_date(input, "monthsAfter", Unit::Months, -1)
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "monthsAfter",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if today is a given number of months after a date field",
    func: op_months_after,
    ignores_value: false,
};
