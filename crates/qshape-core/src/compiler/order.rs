//! ORDER BY compilation.

use crate::ast::OrderBy;
use crate::config::OrderSpec;

use super::alias::AliasResolver;

/// Builds ORDER BY entries in the order given, primary sort key first.
///
/// Returns `None` when there is nothing to sort by.
#[must_use]
pub fn compile_order(order: &[OrderSpec], resolver: &AliasResolver<'_>) -> Option<Vec<OrderBy>> {
    if order.is_empty() {
        return None;
    }

    Some(
        order
            .iter()
            .map(|spec| OrderBy {
                expr: resolver.resolve(&spec.attribute),
                direction: spec.direction,
            })
            .collect(),
    )
}
