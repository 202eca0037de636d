//! `equals`: field equals the value
//!
//! Declared for every field type against every value type. A null value is
//! passed through, so backends render it as an `IS NULL` test.

use qcond_shared::Result;

use super::{compare, ANY_TYPE};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_equals(input: &OperatorInput<'_>) -> Result<Comparison> {
    Ok(compare(input, CompareOp::Eq))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "equals",
    field_types: ANY_TYPE,
    value_types: ANY_TYPE,
    description: "Checks if a field equals the given value",
    func: op_equals,
    ignores_value: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::*;
    use qcond_shared::Value;

    #[test]
    fn test_equals_string() {
        let cmp = apply(op_equals, "status", &Value::string("active")).unwrap();
        assert_eq!(
            cmp,
            Comparison::new("status", CompareOp::Eq, Value::string("active"))
        );
    }

    #[test]
    fn test_equals_keeps_value_type() {
        let cmp = apply(op_equals, "due", &Value::Date(today())).unwrap();
        assert_eq!(cmp.value, Value::Date(today()));
        let cmp = apply(op_equals, "flag", &Value::Bool(true)).unwrap();
        assert_eq!(cmp.value, Value::Bool(true));
    }

    #[test]
    fn test_equals_null() {
        let cmp = apply(op_equals, "email", &Value::Null).unwrap();
        assert!(cmp.value.is_null());
    }
}
