//! Type tags for fields and values
//!
//! A [`TypeTag`] names one of the four value domains a query can talk
//! about. Field types (the declared type of a column) and value types (the
//! domain a literal is coerced into) share the same tag set; an operator
//! may accept a field of one type compared against a value of another,
//! e.g. a DATE field compared against a NUMERIC day count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain of a field or of a coerced value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeTag {
    /// Text
    String,
    /// true / false
    Boolean,
    /// Calendar date without time zone
    Date,
    /// Arbitrary-precision decimal
    Numeric,
}

impl TypeTag {
    /// Every tag, in canonical order
    pub const ALL: [TypeTag; 4] = [
        TypeTag::String,
        TypeTag::Boolean,
        TypeTag::Date,
        TypeTag::Numeric,
    ];

    /// Upper-case wire name of the tag
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::String => "STRING",
            TypeTag::Boolean => "BOOLEAN",
            TypeTag::Date => "DATE",
            TypeTag::Numeric => "NUMERIC",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`TypeTag`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type tag '{0}', expected one of STRING, BOOLEAN, DATE, NUMERIC")]
pub struct ParseTypeTagError(pub String);

impl FromStr for TypeTag {
    type Err = ParseTypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRING" => Ok(TypeTag::String),
            "BOOLEAN" | "BOOL" => Ok(TypeTag::Boolean),
            "DATE" => Ok(TypeTag::Date),
            "NUMERIC" => Ok(TypeTag::Numeric),
            _ => Err(ParseTypeTagError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_name() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.to_string(), tag.as_str());
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("numeric".parse::<TypeTag>().unwrap(), TypeTag::Numeric);
        assert_eq!(" Date ".parse::<TypeTag>().unwrap(), TypeTag::Date);
        assert_eq!("bool".parse::<TypeTag>().unwrap(), TypeTag::Boolean);
        assert!("integer".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_serde_uses_upper_case() {
        let json = serde_json::to_string(&TypeTag::Boolean).unwrap();
        assert_eq!(json, "\"BOOLEAN\"");
        let tag: TypeTag = serde_json::from_str("\"STRING\"").unwrap();
        assert_eq!(tag, TypeTag::String);
    }
}
