//! Placeholder substitution
//!
//! Before a query is parsed, every string value in its JSON tree that is
//! exactly one bracketed name, such as `"[today]"`, is replaced with the
//! literal the matching resolver produces. Brackets inside a longer string
//! are not placeholders and are left alone.
//!
//! What happens to a name nobody resolves is decided by the
//! [`PlaceholderPolicy`].

use once_cell::sync::Lazy;
use qcond_shared::coerce::format_date;
use qcond_shared::{QueryError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::context::PlaceholderContext;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\[\]]+)\]$").expect("placeholder pattern is valid"));

/// Name inside a placeholder token, if `text` is one
pub fn placeholder_name(text: &str) -> Option<&str> {
    PLACEHOLDER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// What to do with a placeholder no resolver knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderPolicy {
    /// Fail with an unresolved placeholder error
    #[default]
    Strict,
    /// Leave the token in place
    Lenient,
}

impl fmt::Display for PlaceholderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderPolicy::Strict => f.write_str("strict"),
            PlaceholderPolicy::Lenient => f.write_str("lenient"),
        }
    }
}

impl FromStr for PlaceholderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(PlaceholderPolicy::Strict),
            "lenient" => Ok(PlaceholderPolicy::Lenient),
            other => Err(format!(
                "unknown placeholder policy '{other}', expected strict or lenient"
            )),
        }
    }
}

/// Placeholder resolver function
pub type PlaceholderFn = Arc<dyn Fn(&PlaceholderContext) -> String + Send + Sync>;

/// Named placeholder resolvers
#[derive(Clone)]
pub struct PlaceholderRegistry {
    resolvers: HashMap<String, PlaceholderFn>,
}

impl fmt::Debug for PlaceholderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderRegistry")
            .field("placeholders", &self.names())
            .finish()
    }
}

impl Default for PlaceholderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderRegistry {
    /// Create a registry with the built-in `me` and `today` placeholders
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("me", |ctx| ctx.current_user_id.clone());
        registry.register("today", |ctx| format_date(ctx.today));
        registry
    }

    /// Create a registry without any placeholder
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// Register a placeholder, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, resolver: F)
    where
        F: Fn(&PlaceholderContext) -> String + Send + Sync + 'static,
    {
        self.resolvers.insert(name.into(), Arc::new(resolver));
    }

    /// Check if a placeholder is registered
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Value of `name` for `ctx`; context overrides win over resolvers
    pub fn lookup(&self, name: &str, ctx: &PlaceholderContext) -> Option<String> {
        if let Some(value) = ctx.override_for(name) {
            return Some(value.to_string());
        }
        self.resolvers.get(name).map(|resolver| resolver(ctx))
    }
}

/// Replaces placeholder tokens in a raw JSON query
#[derive(Debug, Clone, Default)]
pub struct PlaceholderResolver {
    registry: PlaceholderRegistry,
    policy: PlaceholderPolicy,
}

impl PlaceholderResolver {
    /// Create a resolver
    pub fn new(registry: PlaceholderRegistry, policy: PlaceholderPolicy) -> Self {
        Self { registry, policy }
    }

    /// Use a different policy
    #[must_use]
    pub fn with_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active policy
    pub fn policy(&self) -> PlaceholderPolicy {
        self.policy
    }

    /// The registry placeholders are looked up in
    pub fn registry(&self) -> &PlaceholderRegistry {
        &self.registry
    }

    /// Mutable access to the registry, to add placeholders
    pub fn registry_mut(&mut self) -> &mut PlaceholderRegistry {
        &mut self.registry
    }

    /// Substitute every placeholder in `json`
    pub fn substitute(&self, json: JsonValue, ctx: &PlaceholderContext) -> Result<JsonValue> {
        match json {
            JsonValue::String(text) => self.substitute_string(text, ctx),
            JsonValue::Array(items) => items
                .into_iter()
                .map(|item| self.substitute(item, ctx))
                .collect::<Result<Vec<_>>>()
                .map(JsonValue::Array),
            JsonValue::Object(map) => map
                .into_iter()
                .map(|(key, value)| self.substitute(value, ctx).map(|value| (key, value)))
                .collect::<Result<serde_json::Map<_, _>>>()
                .map(JsonValue::Object),
            other => Ok(other),
        }
    }

    fn substitute_string(&self, text: String, ctx: &PlaceholderContext) -> Result<JsonValue> {
        let Some(name) = placeholder_name(&text) else {
            return Ok(JsonValue::String(text));
        };
        match self.registry.lookup(name, ctx) {
            Some(value) => {
                log::trace!("placeholder [{name}] -> {value:?}");
                Ok(JsonValue::String(value))
            }
            None => match self.policy {
                PlaceholderPolicy::Strict => Err(QueryError::unresolved_placeholder(name)),
                PlaceholderPolicy::Lenient => {
                    log::debug!("leaving unknown placeholder [{name}] in place");
                    Ok(JsonValue::String(text))
                }
            },
        }
    }
}
