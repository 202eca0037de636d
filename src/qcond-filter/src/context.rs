//! Per-request context
//!
//! A [`PlaceholderContext`] carries what a request knows about its caller:
//! who is asking, what day it is, and any placeholder values the caller
//! wants to pin. It is built fresh for each request and dropped afterwards.

use chrono::{Local, NaiveDate};
use qcond_shared::coerce::parse_date;
use qcond_shared::{QueryError, Result, TypeTag};
use std::collections::HashMap;

/// Placeholder whose override also moves the evaluation date
pub const TODAY: &str = "today";

/// Data placeholders are resolved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderContext {
    /// Identifier of the user making the request, for `[me]`
    pub current_user_id: String,
    /// Evaluation date, for `[today]` and relative date operators
    pub today: NaiveDate,
    /// Literal values by placeholder name; these win over registered resolvers
    pub overrides: HashMap<String, String>,
}

impl PlaceholderContext {
    /// Create a context for `current_user_id` on `today`
    pub fn new(current_user_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            today,
            overrides: HashMap::new(),
        }
    }

    /// Create a context dated with the local calendar day
    pub fn for_today(current_user_id: impl Into<String>) -> Self {
        Self::new(current_user_id, Local::now().date_naive())
    }

    /// Pin a placeholder to a literal value
    #[must_use]
    pub fn with_override(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    /// Get the pinned value for a placeholder
    pub fn override_for(&self, name: &str) -> Option<&str> {
        self.overrides.get(name).map(String::as_str)
    }

    /// Date relative operators count from
    ///
    /// A `today` override moves this date along with the `[today]`
    /// placeholder, and must then be a `YYYY-MM-DD` date.
    pub fn evaluation_date(&self) -> Result<NaiveDate> {
        match self.override_for(TODAY) {
            Some(text) => parse_date(text).ok_or_else(|| {
                QueryError::coercion(text, TypeTag::Date, "the today override is not a YYYY-MM-DD date")
            }),
            None => Ok(self.today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap();
        let ctx = PlaceholderContext::new("u-1", today).with_override("today", "2000-01-01");
        assert_eq!(ctx.override_for("today"), Some("2000-01-01"));
        assert_eq!(ctx.override_for("me"), None);
        assert_eq!(ctx.current_user_id, "u-1");
    }

    #[test]
    fn test_evaluation_date_follows_today_override() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap();
        let ctx = PlaceholderContext::new("u-1", today);
        assert_eq!(ctx.evaluation_date().unwrap(), today);

        let ctx = ctx.with_override(TODAY, "2000-01-31");
        assert_eq!(
            ctx.evaluation_date().unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 31).unwrap()
        );

        let ctx = ctx.with_override(TODAY, "yesterday");
        let err = ctx.evaluation_date().unwrap_err();
        assert_eq!(err.kind(), qcond_shared::ErrorKind::Coercion);
    }
}
