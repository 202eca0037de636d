//! qcond-cli library
//!
//! Argument parsing, configuration and subcommand execution for the
//! `qcond` binary, exposed for programmatic use and tests.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{parse_args, parse_args_from, Cli, Commands, ConfigCommands, ContextArgs};
pub use commands::run;
pub use config::{validate_config, Config};
