//! WHERE condition compilation.
//!
//! Filter groups compile to `(g1) OR (g2) OR ...` where each group is the
//! AND of its conditions. Both folds are left-associative with the first
//! operand as the seed, so `[[a, b, c]]` becomes `((a AND b) AND c)` and a
//! group or list of one entry is that entry alone. Search terms compile to an
//! OR of `LIKE '%text%'` tests, one per searchable attribute. The filter and
//! search expressions are AND-ed, and the result is AND-ed to the right of
//! any condition already on the statement.

use tracing::trace;

use crate::ast::{BinaryExpr, BinaryOp, ColumnRef, Expr, LiteralKind};
use crate::config::{Attribute, FilterCondition, FilterValue, Operator, QueryConfig, Value};
use crate::error::{CompileError, Result};

use super::alias::AliasResolver;

/// Builds the new condition for a configuration, without the existing WHERE.
///
/// Returns `Ok(None)` when the configuration has neither filters nor search.
pub fn compile_condition(
    config: &QueryConfig,
    resolver: &AliasResolver<'_>,
) -> Result<Option<Expr>> {
    let filter = compile_filter(&config.filter, resolver)?;
    let search = config
        .search_text()
        .and_then(|text| compile_search(&config.searchable, text, resolver));

    Ok(match (filter, search) {
        (Some(filter), Some(search)) => Some(filter.and(group_search(search))),
        (filter, search) => filter.or(search),
    })
}

/// Combines a new condition with the one already on the statement.
///
/// The existing condition stays intact as the left operand.
#[must_use]
pub fn merge_where(existing: Option<Expr>, condition: Expr) -> Expr {
    match existing {
        Some(existing) => existing.and(condition),
        None => condition,
    }
}

/// Escapes the LIKE metacharacters `%` and `_` with a backslash.
#[must_use]
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn compile_filter(
    groups: &[Vec<FilterCondition>],
    resolver: &AliasResolver<'_>,
) -> Result<Option<Expr>> {
    let groups = groups
        .iter()
        .map(|group| compile_and_group(group, resolver))
        .collect::<Result<Vec<_>>>()?;

    let filter = groups.into_iter().reduce(Expr::or);
    if let Some(filter) = &filter {
        trace!(?filter, "built filter condition");
    }
    Ok(filter)
}

fn compile_and_group(group: &[FilterCondition], resolver: &AliasResolver<'_>) -> Result<Expr> {
    group
        .iter()
        .map(|condition| compile_filter_condition(condition, resolver))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .reduce(Expr::and)
        .ok_or_else(|| CompileError::InvalidFilter("empty AND-group".to_string()))
}

fn compile_filter_condition(
    condition: &FilterCondition,
    resolver: &AliasResolver<'_>,
) -> Result<Expr> {
    match (&condition.attribute, &condition.value) {
        (Attribute::Single(name), FilterValue::Scalar(value)) => Ok(comparison(
            resolver.resolve(name),
            condition.operator,
            value,
        )),
        (Attribute::Composite(names), FilterValue::Tuples(tuples)) => {
            compile_composite(names, condition.operator, tuples, resolver)
        }
        (Attribute::Single(name), FilterValue::Tuples(tuples)) => {
            Err(CompileError::ArityMismatch {
                attribute: name.clone(),
                expected: 1,
                found: tuples.len(),
            })
        }
        (Attribute::Composite(names), FilterValue::Scalar(_)) => {
            Err(CompileError::ArityMismatch {
                attribute: condition.attribute.display_name(),
                expected: names.len(),
                found: 1,
            })
        }
    }
}

/// `column <op> literal`, switching to `IS` / `IS NOT` for null literals.
fn comparison(column: ColumnRef, operator: Operator, value: &Value) -> Expr {
    let literal = value.to_literal();
    let op = operator.to_sql(literal.kind() == LiteralKind::Null);
    Expr::Column(column).binary(op, Expr::Literal(literal))
}

/// Expands a composite key filter into a parenthesized OR of per-tuple ANDs.
fn compile_composite(
    names: &[String],
    operator: Operator,
    tuples: &[Vec<Value>],
    resolver: &AliasResolver<'_>,
) -> Result<Expr> {
    let key = names.join(",");
    if operator != Operator::Equal {
        return Err(CompileError::UnsupportedFeature(format!(
            "operator \"{}\" on composite key {key}",
            operator.name()
        )));
    }
    if names.is_empty() {
        return Err(CompileError::InvalidFilter(
            "composite key without attributes".to_string(),
        ));
    }

    let columns: Vec<ColumnRef> = names.iter().map(|name| resolver.resolve(name)).collect();

    let conjunctions = tuples
        .iter()
        .map(|tuple| {
            if tuple.len() != columns.len() {
                return Err(CompileError::ArityMismatch {
                    attribute: key.clone(),
                    expected: columns.len(),
                    found: tuple.len(),
                });
            }
            columns
                .iter()
                .zip(tuple)
                .map(|(column, value)| comparison(column.clone(), Operator::Equal, value))
                .reduce(Expr::and)
                .ok_or_else(|| CompileError::InvalidFilter(format!("empty tuple for {key}")))
        })
        .collect::<Result<Vec<_>>>()?;

    conjunctions
        .into_iter()
        .reduce(Expr::or)
        .map(Expr::parenthesized)
        .ok_or_else(|| CompileError::InvalidFilter(format!("no value tuples for {key}")))
}

fn compile_search(
    searchable: &[String],
    text: &str,
    resolver: &AliasResolver<'_>,
) -> Option<Expr> {
    let pattern = format!("%{}%", escape_like(text));
    let search = searchable
        .iter()
        .map(|attribute| Expr::Column(resolver.resolve(attribute)).like(Expr::string(&pattern)))
        .reduce(Expr::or);
    if let Some(search) = &search {
        trace!(?search, "built search condition");
    }
    search
}

/// Parenthesizes a multi-attribute search before it is AND-ed to a filter.
fn group_search(search: Expr) -> Expr {
    match search {
        Expr::Binary(BinaryExpr {
            operator: BinaryOp::Or,
            ..
        }) => search.parenthesized(),
        other => other,
    }
}
