//! Subcommand execution
//!
//! Every command writes its normal output to the writer it is handed, so
//! commands can be exercised in tests without capturing stdout.

use anyhow::{anyhow, bail, Context, Result};
use qcond_filter::{PlaceholderContext, QueryEngine};
use qcond_operators::OperatorCatalog;
use qcond_shared::TypeTag;
use qcond_sql::{SqlBackend, SqlCondition, SqlDialect};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands, ConfigCommands, ContextArgs};
use crate::config::{create_default_config_file, default_config_path, validate_config, Config};

/// Run one parsed command line against a loaded configuration
pub fn run(
    cli: Cli,
    config: &Config,
    config_path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    match cli.command {
        Commands::Compile {
            input,
            table,
            dialect,
            pretty,
            context,
        } => {
            let dialect = dialect.unwrap_or(config.output.dialect);
            let table = table.or_else(|| config.output.table.clone());
            let pretty = pretty || config.output.pretty;
            compile(&input, table.as_deref(), dialect, pretty, &context, config, out)
        }
        Commands::Operators { field_type, json } => list_operators(field_type, json, out),
        Commands::Validate { input, context } => validate(&input, &context, config, out),
        Commands::Config { command } => handle_config_command(command, config, config_path, out),
    }
}

fn read_query(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read query from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read query file {}", input.display()))
    }
}

fn placeholder_context(args: &ContextArgs, config: &Config) -> PlaceholderContext {
    let user = args
        .user
        .clone()
        .unwrap_or_else(|| config.placeholders.default_user.clone());
    let mut ctx = match args.today {
        Some(today) => PlaceholderContext::new(user, today),
        None => PlaceholderContext::for_today(user),
    };
    for (name, value) in &args.overrides {
        ctx = ctx.with_override(name.clone(), value.clone());
    }
    ctx
}

fn engine(dialect: SqlDialect, args: &ContextArgs, config: &Config) -> Result<QueryEngine<SqlBackend>> {
    let policy = args.policy.unwrap_or(config.placeholders.policy);
    let engine = QueryEngine::builtin(SqlBackend::new(dialect))
        .context("Failed to load the operator catalog")?
        .with_placeholder_policy(policy);
    Ok(engine)
}

fn compile(
    input: &Path,
    table: Option<&str>,
    dialect: SqlDialect,
    pretty: bool,
    args: &ContextArgs,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let text = read_query(input)?;
    let ctx = placeholder_context(args, config);
    let engine = engine(dialect, args, config)?;
    let condition = engine
        .compile(&text, &ctx)
        .with_context(|| format!("Failed to compile {}", input.display()))?;

    let backend = engine.backend();
    if pretty {
        if let Some(table) = table {
            writeln!(out, "SELECT * FROM {} WHERE", dialect.quote_ident(table))?;
        }
        write_tree(backend, &condition, usize::from(table.is_some()), out)?;
    } else {
        let sql = match table {
            Some(table) => backend.render_select(table, &condition),
            None => backend.render_condition(&condition),
        };
        writeln!(out, "{sql}")?;
    }
    Ok(())
}

fn write_tree(
    backend: &SqlBackend,
    condition: &SqlCondition,
    depth: usize,
    out: &mut dyn Write,
) -> Result<()> {
    let mut stack = vec![(condition, depth)];
    while let Some((condition, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        match condition.joiner() {
            Some(joiner) => {
                writeln!(out, "{indent}{joiner}")?;
                stack.extend(condition.operands().iter().rev().map(|operand| (operand, depth + 1)));
            }
            None => writeln!(out, "{indent}{}", backend.render_condition(condition))?,
        }
    }
    Ok(())
}

fn validate(input: &Path, args: &ContextArgs, config: &Config, out: &mut dyn Write) -> Result<()> {
    let text = read_query(input)?;
    let ctx = placeholder_context(args, config);
    let engine = engine(config.output.dialect, args, config)?;
    let query = engine
        .parse(&text, &ctx)
        .with_context(|| format!("Invalid query {}", input.display()))?;
    engine
        .build(&query, &ctx)
        .with_context(|| format!("Invalid query {}", input.display()))?;
    writeln!(
        out,
        "Query is valid: {} ({} comparisons)",
        input.display(),
        query.leaf_count()
    )?;
    Ok(())
}

fn list_operators(field_type: Option<TypeTag>, json: bool, out: &mut dyn Write) -> Result<()> {
    let catalog = OperatorCatalog::builtin().context("Failed to load the operator catalog")?;
    let descriptors = match field_type {
        Some(field_type) => catalog.operators_for_field_type(field_type),
        None => catalog.descriptors().collect(),
    };

    if json {
        let text = serde_json::to_string_pretty(&descriptors)
            .context("Failed to serialize operators")?;
        writeln!(out, "{text}")?;
        return Ok(());
    }

    let width = descriptors.iter().map(|d| d.name.len()).max().unwrap_or(0);
    for descriptor in descriptors {
        let fields: Vec<&str> = descriptor.field_types.iter().map(|t| t.as_str()).collect();
        let values: Vec<&str> = descriptor.value_types.iter().map(|t| t.as_str()).collect();
        writeln!(
            out,
            "{:<width$}  fields: {:<30}  values: {:<30}  {}",
            descriptor.name,
            fields.join(","),
            values.join(","),
            descriptor.description,
        )?;
    }
    Ok(())
}

fn handle_config_command(
    command: ConfigCommands,
    config: &Config,
    config_path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            match config_path {
                Some(path) => writeln!(out, "# loaded from {}", path.display())?,
                None => writeln!(out, "# defaults (no config file found)")?,
            }
            let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
            write!(out, "{text}")?;
            Ok(())
        }
        ConfigCommands::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => default_config_path()
                    .ok_or_else(|| anyhow!("Cannot determine the config directory"))?,
            };
            if path.exists() && !force {
                bail!(
                    "Config file already exists: {}\n\n\
                    Use --force to overwrite:\n  \
                    qcond config init {} --force",
                    path.display(),
                    path.display()
                );
            }
            create_default_config_file(&path)?;
            writeln!(out, "Created config file: {}", path.display())?;
            Ok(())
        }
        ConfigCommands::Check { path } => {
            let path: PathBuf = match path.or_else(|| config_path.map(Path::to_path_buf)) {
                Some(path) => path,
                None => bail!("No config file to check; pass a path or run `qcond config init`"),
            };
            let checked = Config::load_from_file(&path)?;
            validate_config(&checked)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            writeln!(out, "Configuration is valid: {}", path.display())?;
            Ok(())
        }
    }
}
