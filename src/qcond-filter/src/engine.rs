//! Query engine
//!
//! This module ties the pipeline together for one request:
//!
//! ```text
//! JSON text -> placeholder substitution -> AST parse -> validation -> condition
//! ```
//!
//! The engine owns nothing request-scoped. The operator catalog is shared
//! behind an `Arc`, so one engine can serve any number of concurrent
//! requests.

use qcond_operators::{DiscoveryError, OperatorCatalog, OperatorResolver};
use qcond_parser::{Query, QueryParser};
use qcond_shared::{QueryError, Result};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::backend::ConditionBackend;
use crate::builder::ConditionBuilder;
use crate::context::PlaceholderContext;
use crate::placeholder::{PlaceholderPolicy, PlaceholderRegistry, PlaceholderResolver};

/// Runs a finished condition against storage
///
/// Implementations live outside this crate; the engine only hands the
/// condition over.
pub trait PersistenceExecutor<C> {
    /// What a successful execution returns
    type Rows;

    /// Fetch the rows of `table` matching `condition`
    fn execute(&self, table: &str, condition: C) -> anyhow::Result<Self::Rows>;
}

/// Compiles JSON filter queries into backend conditions
pub struct QueryEngine<B> {
    catalog: Arc<OperatorCatalog>,
    placeholders: PlaceholderResolver,
    parser: QueryParser,
    backend: B,
}

impl<B> std::fmt::Debug for QueryEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("catalog", &self.catalog)
            .field("placeholders", &self.placeholders)
            .finish_non_exhaustive()
    }
}

impl<B: ConditionBackend> QueryEngine<B> {
    /// Create an engine over an existing catalog
    pub fn new(catalog: Arc<OperatorCatalog>, backend: B) -> Self {
        Self {
            catalog,
            placeholders: PlaceholderResolver::default(),
            parser: QueryParser::new(),
            backend,
        }
    }

    /// Create an engine with every built-in operator
    pub fn builtin(backend: B) -> std::result::Result<Self, DiscoveryError> {
        Ok(Self::new(Arc::new(OperatorCatalog::builtin()?), backend))
    }

    /// Set the policy for unknown placeholders
    #[must_use]
    pub fn with_placeholder_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.placeholders = self.placeholders.with_policy(policy);
        self
    }

    /// Replace the placeholder registry, keeping the policy
    #[must_use]
    pub fn with_placeholder_registry(mut self, registry: PlaceholderRegistry) -> Self {
        self.placeholders = PlaceholderResolver::new(registry, self.placeholders.policy());
        self
    }

    /// The operator catalog
    pub fn catalog(&self) -> &OperatorCatalog {
        &self.catalog
    }

    /// The condition backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The placeholder resolver
    pub fn placeholders(&self) -> &PlaceholderResolver {
        &self.placeholders
    }

    /// Substitute placeholders and parse, without building a condition
    pub fn parse(&self, json_text: &str, ctx: &PlaceholderContext) -> Result<Query> {
        if json_text.trim().is_empty() {
            return Err(QueryError::malformed("query JSON cannot be empty"));
        }
        let json: JsonValue = serde_json::from_str(json_text)?;
        self.parse_value(json, ctx)
    }

    /// Like [`parse`](Self::parse), for JSON that is already decoded
    pub fn parse_value(&self, json: JsonValue, ctx: &PlaceholderContext) -> Result<Query> {
        let json = self.placeholders.substitute(json, ctx)?;
        self.parser.parse_value(json)
    }

    /// Build the condition for an already parsed query
    pub fn build(&self, query: &Query, ctx: &PlaceholderContext) -> Result<B::Condition> {
        let resolver = OperatorResolver::new(&self.catalog);
        let today = ctx.evaluation_date()?;
        ConditionBuilder::new(resolver, &self.backend, today).build(query)
    }

    /// Compile query text into a condition
    pub fn compile(&self, json_text: &str, ctx: &PlaceholderContext) -> Result<B::Condition> {
        let query = self.parse(json_text, ctx)?;
        let condition = self.build(&query, ctx)?;
        log::debug!("compiled query with {} leaves", query.leaf_count());
        Ok(condition)
    }

    /// Compile already decoded JSON into a condition
    pub fn compile_value(&self, json: JsonValue, ctx: &PlaceholderContext) -> Result<B::Condition> {
        let query = self.parse_value(json, ctx)?;
        self.build(&query, ctx)
    }

    /// Compile query text and render the condition
    pub fn render(&self, json_text: &str, ctx: &PlaceholderContext) -> Result<B::Rendered> {
        let condition = self.compile(json_text, ctx)?;
        Ok(self.backend.render(&condition))
    }

    /// Compile query text and run the condition against `table`
    pub fn execute<E>(
        &self,
        table: &str,
        json_text: &str,
        ctx: &PlaceholderContext,
        executor: &E,
    ) -> anyhow::Result<E::Rows>
    where
        E: PersistenceExecutor<B::Condition>,
    {
        let condition = self.compile(json_text, ctx)?;
        log::debug!("executing condition against '{table}'");
        executor.execute(table, condition)
    }
}
