//! `yearsAfter`: the field's date lies `n` years before today

use qcond_shared::Result;

use super::{relative_date, Unit, DATE, NUMERIC};
use crate::catalog::OperatorInput;
use crate::comparison::Comparison;
use crate::discovery::OperatorRegistration;

pub fn op_years_after(input: &OperatorInput<'_>) -> Result<Comparison> {
    relative_date(input, "yearsAfter", Unit::Years, -1)
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "yearsAfter",
    field_types: DATE,
    value_types: NUMERIC,
    description: "Checks if today is a given number of years after a date field",
    func: op_years_after,
    ignores_value: false,
};
