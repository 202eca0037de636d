//! Configuration management for qcond
//!
//! Settings come from an optional TOML file, found in this order:
//!
//! 1. the path given with `--config`;
//! 2. the path in `$QCOND_CONFIG`;
//! 3. `qcond/config.toml` under the platform config directory.
//!
//! Command-line flags override whatever the file says.

use anyhow::{bail, Context, Result};
use qcond_filter::PlaceholderPolicy;
use qcond_sql::SqlDialect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "QCOND_CONFIG";

/// Highest meaningful verbosity (trace)
pub const MAX_VERBOSITY: u8 = 3;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placeholder substitution
    pub placeholders: PlaceholderConfig,
    /// SQL output
    pub output: OutputConfig,
    /// Debug and diagnostics
    pub debug: DebugConfig,
}

/// Placeholder substitution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Value of `[me]` when `--user` is not given
    pub default_user: String,
    /// Policy for unknown placeholders
    pub policy: PlaceholderPolicy,
}

/// SQL output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Dialect to render
    pub dialect: SqlDialect,
    /// Table for `SELECT` rendering; a bare condition is printed without one
    pub table: Option<String>,
    /// Print conditions as an indented tree
    pub pretty: bool,
}

/// Debug settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Verbosity level, 0 (warnings) to 3 (trace)
    pub verbosity: u8,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            default_user: "anonymous".to_string(),
            policy: PlaceholderPolicy::Strict,
        }
    }
}

impl Config {
    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML config {}", path.display()))?;
        Ok(config)
    }

    /// Load the active configuration
    ///
    /// Returns the defaults when no file is found. An explicitly named file
    /// that does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        Self::load_with_reader(explicit, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load), reading the environment through `env_reader`
    pub fn load_with_reader<F>(explicit: Option<&Path>, env_reader: F) -> Result<(Self, Option<PathBuf>)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(path) = Self::find_config_file(explicit, env_reader)? else {
            log::debug!("no config file found, using defaults");
            return Ok((Self::default(), None));
        };
        log::debug!("loading config from {}", path.display());
        let config = Self::load_from_file(&path)?;
        validate_config(&config)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok((config, Some(path)))
    }

    /// Find the configuration file to use, if any
    pub fn find_config_file<F>(explicit: Option<&Path>, env_reader: F) -> Result<Option<PathBuf>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        if let Some(value) = env_reader(CONFIG_ENV).filter(|v| !v.trim().is_empty()) {
            let path = PathBuf::from(value);
            if !path.exists() {
                bail!("Config file from ${CONFIG_ENV} not found: {}", path.display());
            }
            return Ok(Some(path));
        }

        Ok(default_config_path().filter(|path| path.exists()))
    }

    /// Save configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// `qcond/config.toml` under the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("qcond").join("config.toml"))
}

/// Create a default config file
pub fn create_default_config_file(path: &Path) -> Result<()> {
    Config::default().save(path)
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.placeholders.default_user.trim().is_empty() {
        bail!("placeholders.default_user cannot be empty");
    }

    if config.debug.verbosity > MAX_VERBOSITY {
        bail!(
            "debug.verbosity must be between 0 and {MAX_VERBOSITY}, got {}",
            config.debug.verbosity
        );
    }

    if let Some(table) = &config.output.table {
        if table.trim().is_empty() {
            bail!("output.table cannot be blank; remove it to print bare conditions");
        }
    }

    Ok(())
}
