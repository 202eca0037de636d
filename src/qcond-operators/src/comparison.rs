//! Backend-neutral comparison primitive
//!
//! Operators never build backend conditions themselves. They describe the
//! comparison they want as a [`Comparison`], and the condition backend turns
//! that into its own representation.

use qcond_shared::Value;
use serde::Serialize;
use std::fmt;

/// Primitive comparison kinds a condition backend must support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareOp {
    /// `column = value`
    Eq,
    /// `column <> value`
    Ne,
    /// `column > value`
    Gt,
    /// `column >= value`
    Ge,
    /// `column < value`
    Lt,
    /// `column <= value`
    Le,
    /// `column LIKE value`
    Like,
    /// `column IS NULL`, value ignored
    IsNull,
    /// `column IS NOT NULL`, value ignored
    IsNotNull,
    /// Day of month of `column` equals value
    DayEq,
    /// Month of `column` equals value
    MonthEq,
    /// Year of `column` equals value
    YearEq,
    /// ISO day of week of `column` (Monday = 1) equals value
    DayOfWeekEq,
    /// Date part of `column` equals the date value
    DateEq,
}

impl CompareOp {
    /// Every comparison kind
    pub const ALL: [CompareOp; 14] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Gt,
        CompareOp::Ge,
        CompareOp::Lt,
        CompareOp::Le,
        CompareOp::Like,
        CompareOp::IsNull,
        CompareOp::IsNotNull,
        CompareOp::DayEq,
        CompareOp::MonthEq,
        CompareOp::YearEq,
        CompareOp::DayOfWeekEq,
        CompareOp::DateEq,
    ];

    /// Short name of the comparison kind
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Gt => "gt",
            CompareOp::Ge => "ge",
            CompareOp::Lt => "lt",
            CompareOp::Le => "le",
            CompareOp::Like => "like",
            CompareOp::IsNull => "isNull",
            CompareOp::IsNotNull => "isNotNull",
            CompareOp::DayEq => "dayEq",
            CompareOp::MonthEq => "monthEq",
            CompareOp::YearEq => "yearEq",
            CompareOp::DayOfWeekEq => "dayOfWeekEq",
            CompareOp::DateEq => "dateEq",
        }
    }

    /// Whether the comparison ignores its value
    pub fn is_unary(self) -> bool {
        matches!(self, CompareOp::IsNull | CompareOp::IsNotNull)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One primitive comparison against a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Comparison {
    /// Column reference
    pub column: String,
    /// Comparison kind
    pub op: CompareOp,
    /// Right-hand side, [`Value::Null`] for unary kinds
    pub value: Value,
}

impl Comparison {
    /// Create a comparison
    pub fn new(column: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self {
            column: column.into(),
            op,
            value,
        }
    }

    /// Create a comparison that takes no value
    pub fn unary(column: impl Into<String>, op: CompareOp) -> Self {
        Self::new(column, op, Value::Null)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.op.is_unary() {
            write!(f, "{} {}", self.column, self.op)
        } else {
            write!(f, "{} {} {}", self.column, self.op, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_display_drops_value() {
        let cmp = Comparison::unary("email", CompareOp::IsNull);
        assert_eq!(cmp.value, Value::Null);
        assert_eq!(cmp.to_string(), "email isNull");
    }

    #[test]
    fn test_display() {
        let cmp = Comparison::new("status", CompareOp::Eq, Value::string("active"));
        assert_eq!(cmp.to_string(), "status eq active");
    }

    #[test]
    fn test_all_names_are_distinct() {
        let mut names: Vec<_> = CompareOp::ALL.iter().map(|op| op.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CompareOp::ALL.len());
    }
}
