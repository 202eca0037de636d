//! SQL dialects
//!
//! Dialects differ in how identifiers are quoted, how booleans and dates
//! are written, and how date components are extracted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// PostgreSQL: `"ident"`, `TRUE`, `DATE '...'`, `EXTRACT(...)`
    #[default]
    Postgres,
    /// Microsoft SQL Server: `[ident]`, `1`/`0`, `DAY()`/`MONTH()`/`YEAR()`
    SqlServer,
}

/// Error returned when a string does not name a dialect
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown SQL dialect '{0}', expected postgres or sqlserver")]
pub struct ParseDialectError(pub String);

impl SqlDialect {
    /// Every dialect
    pub const ALL: [SqlDialect; 2] = [SqlDialect::Postgres, SqlDialect::SqlServer];

    /// Lower-case name of the dialect
    pub fn as_str(self) -> &'static str {
        match self {
            SqlDialect::Postgres => "postgres",
            SqlDialect::SqlServer => "sqlserver",
        }
    }

    /// Quote a possibly dotted identifier, one segment at a time
    pub fn quote_ident(self, ident: &str) -> String {
        ident
            .split('.')
            .map(|segment| match self {
                SqlDialect::Postgres => format!("\"{}\"", segment.replace('"', "\"\"")),
                SqlDialect::SqlServer => format!("[{}]", segment.replace(']', "]]")),
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    pub(crate) fn bool_literal(self, b: bool) -> &'static str {
        match (self, b) {
            (SqlDialect::Postgres, true) => "TRUE",
            (SqlDialect::Postgres, false) => "FALSE",
            (SqlDialect::SqlServer, true) => "1",
            (SqlDialect::SqlServer, false) => "0",
        }
    }

    pub(crate) fn date_literal(self, date: &str) -> String {
        match self {
            SqlDialect::Postgres => format!("DATE '{date}'"),
            SqlDialect::SqlServer => format!("CAST('{date}' AS DATE)"),
        }
    }

    pub(crate) fn day_of_month(self, column: &str) -> String {
        match self {
            SqlDialect::Postgres => format!("EXTRACT(DAY FROM {column})"),
            SqlDialect::SqlServer => format!("DAY({column})"),
        }
    }

    pub(crate) fn month(self, column: &str) -> String {
        match self {
            SqlDialect::Postgres => format!("EXTRACT(MONTH FROM {column})"),
            SqlDialect::SqlServer => format!("MONTH({column})"),
        }
    }

    pub(crate) fn year(self, column: &str) -> String {
        match self {
            SqlDialect::Postgres => format!("EXTRACT(YEAR FROM {column})"),
            SqlDialect::SqlServer => format!("YEAR({column})"),
        }
    }

    /// ISO day of week, Monday = 1
    pub(crate) fn iso_day_of_week(self, column: &str) -> String {
        match self {
            SqlDialect::Postgres => format!("EXTRACT(ISODOW FROM {column})"),
            // Normalises away the session's DATEFIRST setting
            SqlDialect::SqlServer => {
                format!("((DATEPART(WEEKDAY, {column}) + @@DATEFIRST - 2) % 7) + 1")
            }
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "sqlserver" | "mssql" => Ok(SqlDialect::SqlServer),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}
