//! LIMIT compilation.

use std::num::NonZeroU32;

use crate::ast::LimitClause;

/// Turns a page size and optional 1-based page into an offset/count pair.
///
/// Without a page size there is no LIMIT clause and the page is ignored.
#[must_use]
pub fn compile_limit(limit: Option<NonZeroU32>, page: Option<NonZeroU32>) -> Option<LimitClause> {
    let count = u64::from(limit?.get());
    // (2^32 - 1) * (2^32 - 2) still fits in a u64.
    let offset = page.map_or(0, |page| count * u64::from(page.get() - 1));
    Some(LimitClause { offset, count })
}
