//! `like`: SQL pattern match on string fields
//!
//! The value is used as the pattern verbatim; `%` and `_` keep their
//! wildcard meaning.

use qcond_shared::{Result, Value};

use super::{required_text, STRING};
use crate::catalog::OperatorInput;
use crate::comparison::{CompareOp, Comparison};
use crate::discovery::OperatorRegistration;

pub fn op_like(input: &OperatorInput<'_>) -> Result<Comparison> {
    let pattern = required_text(input, "like")?;
    Ok(Comparison::new(
        input.column,
        CompareOp::Like,
        Value::string(pattern),
    ))
}

pub const REGISTRATION: OperatorRegistration = OperatorRegistration {
    name: "like",
    field_types: STRING,
    value_types: STRING,
    description: "Checks if a string field matches the given pattern",
    func: op_like,
    ignores_value: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::*;
    use qcond_shared::ErrorKind;

    #[test]
    fn test_like_uses_pattern_as_given() {
        let cmp = apply(op_like, "name", &Value::string("%an_")).unwrap();
        assert_eq!(
            cmp,
            Comparison::new("name", CompareOp::Like, Value::string("%an_"))
        );
    }

    #[test]
    fn test_like_rejects_null() {
        let err = apply(op_like, "name", &Value::Null).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
    }
}
