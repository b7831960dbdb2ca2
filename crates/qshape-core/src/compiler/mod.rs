//! The query compiler.
//!
//! Extends a base [`SelectStatement`] with the ORDER BY, LIMIT and WHERE
//! parts described by a [`QueryConfig`]. Each pass only reads the statement
//! and returns a fragment; fragments are applied once every pass succeeded,
//! so a rejected configuration leaves the statement exactly as it was.
//!
//! Compiling is not idempotent: compiling the same filter twice onto one
//! statement AND-s the condition twice.

mod alias;
mod condition;
mod limit;
mod order;

use tracing::{debug, trace, warn};

use crate::ast::{Expr, LimitClause, OrderBy, SelectStatement};
use crate::config::QueryConfig;
use crate::error::{CompileError, Result};

pub use alias::AliasResolver;
pub use condition::{compile_condition, escape_like, merge_where};
pub use limit::compile_limit;
pub use order::compile_order;

/// Compiles `config` onto `ast` in place.
///
/// # Errors
///
/// Returns [`CompileError::UnsupportedFeature`] when `limitPer` is set, and
/// the filter errors of [`QueryCompiler::fragments`]. The statement is not
/// modified when an error is returned.
pub fn compile(config: &QueryConfig, ast: &mut SelectStatement) -> Result<()> {
    QueryCompiler::new(config).compile_into(ast)
}

/// The parts of a statement produced by one compile call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    /// New ORDER BY entries, replacing any existing ones.
    pub order_by: Option<Vec<OrderBy>>,
    /// New LIMIT clause, replacing any existing one.
    pub limit: Option<LimitClause>,
    /// New condition, AND-ed to the existing WHERE clause.
    pub condition: Option<Expr>,
}

impl Fragments {
    /// Returns whether no pass contributed anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order_by.is_none() && self.limit.is_none() && self.condition.is_none()
    }

    /// Writes the fragments into a statement.
    ///
    /// Absent fragments leave their part of the statement untouched.
    pub fn apply(self, ast: &mut SelectStatement) {
        if let Some(order_by) = self.order_by {
            ast.order_by = Some(order_by);
        }
        if let Some(limit) = self.limit {
            ast.limit = Some(limit);
        }
        if let Some(condition) = self.condition {
            ast.where_clause = Some(merge_where(ast.where_clause.take(), condition));
        }
    }
}

/// Compiles one configuration onto statements.
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler<'c> {
    config: &'c QueryConfig,
}

impl<'c> QueryCompiler<'c> {
    /// Creates a compiler for a configuration.
    #[must_use]
    pub const fn new(config: &'c QueryConfig) -> Self {
        Self { config }
    }

    /// Runs every pass against `ast` without modifying it.
    ///
    /// # Errors
    ///
    /// - [`CompileError::UnsupportedFeature`] if `limitPer` is set, or a
    ///   composite key filter uses an operator other than `equal`.
    /// - [`CompileError::ArityMismatch`] if a filter value does not match the
    ///   shape of its attribute.
    /// - [`CompileError::InvalidFilter`] for empty AND-groups, composite keys
    ///   or value tuple lists.
    pub fn fragments(&self, ast: &SelectStatement) -> Result<Fragments> {
        let config = self.config;
        if config.limit_per.is_some() {
            warn!("rejecting query shape with limitPer");
            return Err(CompileError::UnsupportedFeature("\"limitPer\"".to_string()));
        }

        debug!(
            order = config.order.len(),
            limit = ?config.limit,
            page = ?config.page,
            filter_groups = config.filter.len(),
            searchable = config.searchable.len(),
            search = config.search_text().is_some(),
            "compiling query shape"
        );

        let resolver = AliasResolver::new(ast);
        let fragments = Fragments {
            order_by: compile_order(&config.order, &resolver),
            limit: compile_limit(config.limit, config.page),
            condition: compile_condition(config, &resolver)?,
        };

        trace!(?fragments, "compiled fragments");
        Ok(fragments)
    }

    /// Runs every pass and applies the result to `ast`.
    ///
    /// # Errors
    ///
    /// See [`QueryCompiler::fragments`]. The statement is not modified when an
    /// error is returned.
    pub fn compile_into(&self, ast: &mut SelectStatement) -> Result<()> {
        let fragments = self.fragments(ast)?;
        if fragments.is_empty() {
            debug!("query shape contributes nothing");
        }
        fragments.apply(ast);
        Ok(())
    }
}
