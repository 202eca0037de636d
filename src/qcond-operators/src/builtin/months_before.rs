//! `monthsBefore`
//!
//! Month arithmetic clamps to the last day of shorter months, so from
//! January 31 one month ahead is the end of February.

use qcond_shared::Result;

use super::{relative_date, Unit, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::Comparison;
use crate::discovery::OperatorRegistration;

pub fn op_months_before(input: &OperatorInput<'_>) -> Result<Comparison> {
    relative_date(input, "monthsBefore", Unit::Months, 1)
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "monthsBefore",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if today is a given number of months before a date field",
    func: op_months_before,
    ignores_value: false,
};
