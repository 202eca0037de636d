//! Value types for qcond
//!
//! This module provides the [`Value`] enum: a raw JSON scalar after it has
//! been coerced into one of the four query domains. Operators receive
//! values of this type; backends render them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::Serializer;
use serde::Serialize;
use std::fmt;

use crate::constants::DATE_FORMAT;
use crate::types::TypeTag;

/// A coerced query value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Calendar date
    Date(NaiveDate),
    /// Arbitrary-precision decimal
    Numeric(Decimal),
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The domain this value belongs to, `None` for null
    #[must_use]
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeTag::Boolean),
            Value::String(_) => Some(TypeTag::String),
            Value::Date(_) => Some(TypeTag::Date),
            Value::Numeric(_) => Some(TypeTag::Numeric),
        }
    }

    /// Get the type name of the value
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Numeric(_) => "numeric",
        }
    }

    /// Borrow the decimal inside a numeric value
    #[must_use]
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Numeric(d) => Some(d),
            _ => None,
        }
    }

    /// Borrow the string inside a string value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the date inside a date value
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Numeric(n) => write!(f, "{n}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Numeric(d)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            // Keep full precision; decimals travel as strings
            Value::Numeric(n) => serializer.serialize_str(&n.to_string()),
        }
    }
}
