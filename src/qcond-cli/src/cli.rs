//! Command-line interface for qcond
//!
//! This module defines the command-line arguments with clap. Parsing is
//! kept separate from execution so the argument surface can be tested
//! without touching the filesystem.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use qcond_filter::PlaceholderPolicy;
use qcond_shared::TypeTag;
use qcond_sql::SqlDialect;
use std::path::PathBuf;

/// qcond - compile JSON filter queries into SQL conditions
#[derive(Parser, Debug)]
#[command(name = "qcond")]
#[command(author, version, about)]
#[command(
    long_about = "qcond - compile JSON filter queries into SQL conditions\n\n\
    A query is a JSON tree of AND/OR composites and typed leaf comparisons.\n\
    qcond substitutes placeholders such as [me] and [today], resolves each\n\
    operator against the leaf's field type and renders the result as SQL."
)]
#[command(after_help = "EXAMPLES:\n  \
    # Compile a query file to a WHERE condition\n  \
    qcond compile query.json\n\n  \
    # Render a full SELECT for SQL Server\n  \
    qcond compile query.json --table orders --dialect sqlserver\n\n  \
    # Read the query from stdin with a fixed evaluation date\n  \
    cat query.json | qcond compile - --today 2025-08-21\n\n  \
    # List the operators usable on DATE fields\n  \
    qcond operators --field-type DATE")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Options that control placeholder substitution
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextArgs {
    /// Value of the [me] placeholder
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Evaluation date, YYYY-MM-DD (defaults to the local date)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// What to do with unknown placeholders (strict or lenient)
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<PlaceholderPolicy>,

    /// Override a placeholder (can be used multiple times)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_override, action = clap::ArgAction::Append)]
    pub overrides: Vec<(String, String)>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a JSON query into SQL
    #[command(after_help = "EXAMPLES:\n  \
        qcond compile query.json --table orders\n  \
        qcond compile - --user u-42 --set region=EMEA < query.json")]
    Compile {
        /// Query file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Render a full SELECT over this table
        #[arg(short, long, value_name = "TABLE")]
        table: Option<String>,

        /// SQL dialect (postgres or sqlserver)
        #[arg(short, long, value_name = "DIALECT")]
        dialect: Option<SqlDialect>,

        /// Print the condition as an indented tree
        #[arg(short, long)]
        pretty: bool,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// List registered operators
    Operators {
        /// Only operators that accept this field type
        #[arg(long, value_name = "TYPE")]
        field_type: Option<TypeTag>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that a query compiles, without printing it
    Validate {
        /// Query file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Create a default configuration file
    Init {
        /// Path to create the config file at (defaults to the user config)
        path: Option<PathBuf>,

        /// Force overwrite if the file exists
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file to check (defaults to the active one)
        path: Option<PathBuf>,
    },
}

fn parse_override(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

/// Parse command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Parse command-line arguments from a vector (for testing)
pub fn parse_args_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_parsing() {
        let cli = parse_args_from([
            "qcond", "compile", "query.json", "--table", "orders", "--dialect", "sqlserver",
            "--today", "2025-08-21", "--user", "u-1", "--policy", "lenient", "-p",
        ])
        .unwrap();
        match cli.command {
            Commands::Compile {
                input,
                table,
                dialect,
                pretty,
                context,
            } => {
                assert_eq!(input, PathBuf::from("query.json"));
                assert_eq!(table.as_deref(), Some("orders"));
                assert_eq!(dialect, Some(SqlDialect::SqlServer));
                assert!(pretty);
                assert_eq!(context.user.as_deref(), Some("u-1"));
                assert_eq!(context.today, NaiveDate::from_ymd_opt(2025, 8, 21));
                assert_eq!(context.policy, Some(PlaceholderPolicy::Lenient));
            }
            other => panic!("Expected Compile command, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_defaults_to_stdin() {
        let cli = parse_args_from(["qcond", "compile"]).unwrap();
        match cli.command {
            Commands::Compile { input, context, .. } => {
                assert_eq!(input, PathBuf::from("-"));
                assert_eq!(context, ContextArgs::default());
            }
            other => panic!("Expected Compile command, got {other:?}"),
        }
    }

    #[test]
    fn test_overrides() {
        let cli = parse_args_from([
            "qcond", "validate", "q.json", "--set", "region=EMEA", "--set", "today=2020-01-01",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate { context, .. } => assert_eq!(
                context.overrides,
                vec![
                    ("region".to_string(), "EMEA".to_string()),
                    ("today".to_string(), "2020-01-01".to_string())
                ]
            ),
            other => panic!("Expected Validate command, got {other:?}"),
        }
        assert!(parse_args_from(["qcond", "validate", "--set", "novalue"]).is_err());
        assert!(parse_args_from(["qcond", "validate", "--set", "=x"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_args_from(["qcond", "compile", "--dialect", "oracle"]).is_err());
        assert!(parse_args_from(["qcond", "compile", "--today", "21/08/2025"]).is_err());
        assert!(parse_args_from(["qcond", "compile", "--policy", "loose"]).is_err());
        assert!(parse_args_from(["qcond", "operators", "--field-type", "TEXT"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args_from(["qcond", "operators", "-vv", "--config", "c.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Commands::Operators { field_type, json } => {
                assert_eq!(field_type, None);
                assert!(!json);
            }
            other => panic!("Expected Operators command, got {other:?}"),
        }
    }

    #[test]
    fn test_config_subcommands() {
        let cli = parse_args_from(["qcond", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show
            }
        ));

        let cli = parse_args_from(["qcond", "config", "init", "q.toml", "--force"]).unwrap();
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Init { path, force },
            } => {
                assert_eq!(path, Some(PathBuf::from("q.toml")));
                assert!(force);
            }
            other => panic!("Expected Config Init command, got {other:?}"),
        }

        let cli = parse_args_from(["qcond", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Check { path: None }
            }
        ));
    }
}
