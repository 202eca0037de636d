//! `yearsBefore`

use qcond_shared::Result;

use super::{relative_date, Unit, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::Comparison;
use crate::discovery::OperatorRegistration;

pub fn op_years_before(input: &OperatorInput<'_>) -> Result<Comparison> {
    relative_date(input, "yearsBefore", Unit::Years, 1)
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "yearsBefore",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if today is a given number of years before a date field",
    func: op_years_before,
    ignores_value: false,
};
