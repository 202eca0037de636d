//! `lessThan`

use qcond_shared::Result;

use super::{compare, ORDERED};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_less_than(input: &OperatorInput<'_>) -> Result<Comparison> {
    Ok(compare(input, CompareOp::Lt))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "lessThan",
    field_types: ORDERED,
    value_types: ORDERED,
    description: "Checks if a field is strictly less than the given value",
    func: op_less_than,
    ignores_value: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::*;

    #[test]
    fn test_less_than() {
        let cmp = apply(op_less_than, "amount", &num(10)).unwrap();
        assert_eq!(cmp, Comparison::new("amount", CompareOp::Lt, num(10)));
    }
}
